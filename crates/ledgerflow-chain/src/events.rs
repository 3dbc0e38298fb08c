use std::collections::BTreeMap;

use ledgerflow_config::{EventName, ModeDef, StartParams};
use ledgerflow_workflow::{ChainIdentifiers, LedgerEvent};

/// Build the fixed, mode-specific ordered event list for one run.
///
/// All events start pending with no timestamp. Details are fixed here and
/// never re-derived afterwards.
pub fn build_events(
  def: &ModeDef,
  params: &StartParams,
  identifiers: &ChainIdentifiers,
) -> Vec<LedgerEvent> {
  def
    .event_names
    .iter()
    .enumerate()
    .map(|(index, name)| {
      let id = index as u32 + 1;
      LedgerEvent::pending(id, *name, details_for(*name, params, identifiers))
    })
    .collect()
}

fn details_for(
  name: EventName,
  params: &StartParams,
  ids: &ChainIdentifiers,
) -> BTreeMap<String, String> {
  let mut details = BTreeMap::new();
  let mut put = |key: &str, value: String| {
    details.insert(key.to_string(), value);
  };

  let recipients = params.recipients();

  match name {
    EventName::ShareInvitationCreated => {
      put("dataset_id", ids.dataset_id.clone());
      put("invitation_id", ids.reference_id.clone());
      put("recipients", recipients.join(", "));
      put(
        "message",
        format!(
          "Share invitation created for {} recipient(s)",
          recipients.len()
        ),
      );
    }
    EventName::InvitationEmailSent => {
      put("recipients", recipients.join(", "));
      put(
        "message",
        format!("Invitation email sent to {}", recipients.join(", ")),
      );
    }
    EventName::LicenseOfferCreated => {
      put("offer_id", ids.reference_id.clone());
      put("dataset_id", ids.dataset_id.clone());
      if let StartParams::License { monthly_fee, .. } = params {
        put("monthly_fee_usdc", monthly_fee.to_string());
      }
      put(
        "message",
        format!("License offer created for {} recipient(s)", recipients.len()),
      );
    }
    EventName::LicenseTermsRecorded => {
      if let StartParams::License {
        license_template,
        monthly_fee,
        ..
      } = params
      {
        put("template", license_template.clone());
        put("monthly_fee_usdc", monthly_fee.to_string());
      }
      put("message", "License terms recorded on ledger".to_string());
    }
    EventName::PaymentChannelOpened => {
      put("contract_address", ids.contract_address.clone());
      put("message", "Payment channel opened".to_string());
    }
    EventName::LicenseTokenMinted => {
      put("tx_hash", ids.tx_hash.clone());
      put("contract_address", ids.contract_address.clone());
      put("message", "License token minted on chain".to_string());
    }
    EventName::OfferEmailSent => {
      put("recipients", recipients.join(", "));
      put(
        "message",
        format!("License offer sent to {}", recipients.join(", ")),
      );
    }
    EventName::FirmWorkspaceCreated => {
      put("firm_id", ids.reference_id.clone());
      put("dataset_id", ids.dataset_id.clone());
      put("message", "Firm workspace created".to_string());
    }
    EventName::FirmMembersResolved => {
      if let StartParams::FirmShare { member_count, .. } = params {
        put("member_count", member_count.to_string());
        put(
          "message",
          format!("Resolved {member_count} firm member(s)"),
        );
      }
    }
    EventName::GroupTokenMinted => {
      put("tx_hash", ids.tx_hash.clone());
      if let StartParams::FirmShare { member_count, .. } = params {
        put("member_count", member_count.to_string());
      }
      put("message", "Group access token minted on chain".to_string());
    }
    EventName::AccessPolicyApplied => {
      if let StartParams::FirmShare {
        license_template, ..
      } = params
      {
        put("template", license_template.clone());
      }
      put("message", "Firm-wide access policy applied".to_string());
    }
    EventName::AdminNotified => {
      let admin = match params {
        StartParams::FirmShare {
          admin_email: Some(email),
          ..
        } => email.clone(),
        _ => "unassigned".to_string(),
      };
      put("admin_email", admin.clone());
      put("message", format!("Firm admin notified: {admin}"));
    }
    EventName::CoopListingPublished => {
      put("listing_id", ids.reference_id.clone());
      put("dataset_id", ids.dataset_id.clone());
      if let StartParams::CoopShare { price_usdc, .. } = params {
        put("price_usdc", price_usdc.to_string());
      }
      put("message", "Co-op listing published".to_string());
    }
    EventName::RevenueSplitConfigured => {
      if let StartParams::CoopShare {
        member_count,
        price_usdc,
      } = params
      {
        put("member_count", member_count.to_string());
        put("price_usdc", price_usdc.to_string());
        put(
          "message",
          format!("Revenue split configured across {member_count} member(s)"),
        );
      }
    }
    EventName::ListingIndexed => {
      put("listing_id", ids.reference_id.clone());
      put("explorer_url", ids.explorer_url.clone());
      put("message", "Listing indexed and discoverable".to_string());
    }
    EventName::LedgerAnchored => {
      put("tx_hash", ids.tx_hash.clone());
      put("explorer_url", ids.explorer_url.clone());
      put("message", "Activity anchored to the ledger".to_string());
    }
  }

  details
}
