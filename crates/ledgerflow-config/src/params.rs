use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mode::Mode;

/// Errors produced when validating start parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
  #[error("no recipients given")]
  NoRecipients,

  #[error("invalid email address: {0}")]
  InvalidEmail(String),

  #[error("monthly fee must be greater than zero")]
  ZeroFee,

  #[error("listing price must be greater than zero")]
  ZeroPrice,

  #[error("member count must be greater than zero")]
  NoMembers,

  #[error("license template must not be empty")]
  EmptyTemplate,
}

/// User-supplied parameters for starting a run, captured at run start and
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StartParams {
  Share {
    shared_emails: Vec<String>,
  },
  License {
    licensed_emails: Vec<String>,
    /// Monthly fee in whole USDC.
    monthly_fee: u64,
    license_template: String,
  },
  FirmShare {
    #[serde(skip_serializing_if = "Option::is_none")]
    admin_email: Option<String>,
    monthly_fee: u64,
    license_template: String,
    member_count: u32,
  },
  CoopShare {
    /// One-time listing price in whole USDC.
    price_usdc: u64,
    member_count: u32,
  },
}

impl StartParams {
  pub fn mode(&self) -> Mode {
    match self {
      StartParams::Share { .. } => Mode::Share,
      StartParams::License { .. } => Mode::License,
      StartParams::FirmShare { .. } => Mode::FirmShare,
      StartParams::CoopShare { .. } => Mode::CoopShare,
    }
  }

  /// Validate the parameters before a run is allowed to start.
  pub fn validate(&self) -> Result<(), ParamError> {
    match self {
      StartParams::Share { shared_emails } => {
        validate_emails(shared_emails)?;
      }
      StartParams::License {
        licensed_emails,
        monthly_fee,
        license_template,
      } => {
        validate_emails(licensed_emails)?;
        if *monthly_fee == 0 {
          return Err(ParamError::ZeroFee);
        }
        if license_template.trim().is_empty() {
          return Err(ParamError::EmptyTemplate);
        }
      }
      StartParams::FirmShare {
        admin_email,
        monthly_fee,
        license_template,
        member_count,
      } => {
        if let Some(email) = admin_email {
          validate_email(email)?;
        }
        if *monthly_fee == 0 {
          return Err(ParamError::ZeroFee);
        }
        if license_template.trim().is_empty() {
          return Err(ParamError::EmptyTemplate);
        }
        if *member_count == 0 {
          return Err(ParamError::NoMembers);
        }
      }
      StartParams::CoopShare {
        price_usdc,
        member_count,
      } => {
        if *price_usdc == 0 {
          return Err(ParamError::ZeroPrice);
        }
        if *member_count == 0 {
          return Err(ParamError::NoMembers);
        }
      }
    }

    Ok(())
  }

  /// Recipient emails, if this mode has any.
  pub fn recipients(&self) -> &[String] {
    match self {
      StartParams::Share { shared_emails } => shared_emails,
      StartParams::License {
        licensed_emails, ..
      } => licensed_emails,
      _ => &[],
    }
  }
}

fn validate_emails(emails: &[String]) -> Result<(), ParamError> {
  if emails.is_empty() {
    return Err(ParamError::NoRecipients);
  }
  for email in emails {
    validate_email(email)?;
  }
  Ok(())
}

// Deliberately shallow: the real recipient check belongs to the backend.
fn validate_email(email: &str) -> Result<(), ParamError> {
  let valid = email.split_once('@').is_some_and(|(local, domain)| {
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
  });
  if valid {
    Ok(())
  } else {
    Err(ParamError::InvalidEmail(email.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_share_requires_recipients() {
    let params = StartParams::Share {
      shared_emails: vec![],
    };
    assert_eq!(params.validate(), Err(ParamError::NoRecipients));
  }

  #[test]
  fn test_share_rejects_malformed_email() {
    let params = StartParams::Share {
      shared_emails: vec!["not-an-email".to_string()],
    };
    assert_eq!(
      params.validate(),
      Err(ParamError::InvalidEmail("not-an-email".to_string()))
    );
  }

  #[test]
  fn test_license_rejects_zero_fee() {
    let params = StartParams::License {
      licensed_emails: vec!["c@y.com".to_string()],
      monthly_fee: 0,
      license_template: "standard-v1".to_string(),
    };
    assert_eq!(params.validate(), Err(ParamError::ZeroFee));
  }

  #[test]
  fn test_firm_share_admin_email_is_optional() {
    let params = StartParams::FirmShare {
      admin_email: None,
      monthly_fee: 120,
      license_template: "firm-v1".to_string(),
      member_count: 12,
    };
    assert!(params.validate().is_ok());
  }

  #[test]
  fn test_coop_rejects_zero_price() {
    let params = StartParams::CoopShare {
      price_usdc: 0,
      member_count: 3,
    };
    assert_eq!(params.validate(), Err(ParamError::ZeroPrice));
  }

  #[test]
  fn test_mode_mapping() {
    let params = StartParams::Share {
      shared_emails: vec!["a@x.com".to_string()],
    };
    assert_eq!(params.mode(), Mode::Share);
  }

  #[test]
  fn test_params_round_trip_tagged() {
    let params = StartParams::License {
      licensed_emails: vec!["c@y.com".to_string()],
      monthly_fee: 50,
      license_template: "standard-v1".to_string(),
    };
    let json = serde_json::to_string(&params).unwrap();
    assert!(json.contains(r#""mode":"license""#));
    let back: StartParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
  }
}
