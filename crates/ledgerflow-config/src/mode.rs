use serde::{Deserialize, Serialize};

/// A sharing mode. Each mode is a configuration value for the same engine,
/// not a separate code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  /// Private share with named recipients.
  Share,
  /// Paid license offer with a monthly fee.
  License,
  /// Firm-wide share backed by a group token.
  FirmShare,
  /// Data co-op listing with a one-time price.
  CoopShare,
}

impl Mode {
  /// The JSON key under which this mode's primary identifier is reported.
  pub fn reference_key(&self) -> &'static str {
    match self {
      Mode::Share => "invitation_id",
      Mode::License => "offer_id",
      Mode::FirmShare => "firm_id",
      Mode::CoopShare => "listing_id",
    }
  }

  /// Prefix used when synthesizing this mode's primary identifier.
  pub fn reference_prefix(&self) -> &'static str {
    match self {
      Mode::Share => "inv",
      Mode::License => "off",
      Mode::FirmShare => "firm",
      Mode::CoopShare => "coop",
    }
  }
}

impl std::fmt::Display for Mode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Mode::Share => "share",
      Mode::License => "license",
      Mode::FirmShare => "firm_share",
      Mode::CoopShare => "coop_share",
    };
    f.write_str(name)
  }
}
