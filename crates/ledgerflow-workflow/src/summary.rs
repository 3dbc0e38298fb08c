//! Derived JSON summary of a run, for the completion dialog and copy-to-
//! clipboard flows. Mode-specific shape, valid once a run has produced its
//! identifiers.

use ledgerflow_config::StartParams;
use serde_json::{Value, json};

use crate::state::WorkflowState;

/// Build the descriptive summary document for the current run.
///
/// Returns `None` while no run has produced identifiers (idle instance or a
/// reset one).
pub fn summary(state: &WorkflowState) -> Option<Value> {
  let run = state.run.as_ref()?;
  let ids = &run.identifiers;

  let mut doc = json!({
    "dataset_id": ids.dataset_id,
    (run.mode.reference_key()): ids.reference_id,
    "tx_hash": ids.tx_hash,
    "contract_address": ids.contract_address,
    "issuer_address": ids.issuer_address,
    "explorer_url": ids.explorer_url,
    "events_logged": state.completed_count(),
    "completed": state.is_complete,
  });

  let terms = match &run.params {
    StartParams::Share { shared_emails } => json!({
      "type": "private_share",
      "shared_with": shared_emails,
    }),
    StartParams::License {
      licensed_emails,
      monthly_fee,
      license_template,
    } => json!({
      "type": "paid_license",
      "licensed_to": licensed_emails,
      "price": monthly_fee,
      "billing_period": "monthly",
      "currency": "USDC",
      "template": license_template,
    }),
    StartParams::FirmShare {
      admin_email,
      monthly_fee,
      license_template,
      member_count,
    } => json!({
      "type": "firm_share",
      "admin_email": admin_email,
      "price": monthly_fee,
      "billing_period": "monthly",
      "currency": "USDC",
      "template": license_template,
      "member_count": member_count,
    }),
    StartParams::CoopShare {
      price_usdc,
      member_count,
    } => json!({
      "type": "coop_listing",
      "price": price_usdc,
      "currency": "USDC",
      "member_count": member_count,
    }),
  };

  if let (Value::Object(doc), Value::Object(terms)) = (&mut doc, terms) {
    doc.extend(terms);
  }

  Some(doc)
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use ledgerflow_config::{EventName, Mode};

  use super::*;
  use crate::event::{EventStatus, LedgerEvent};
  use crate::state::{ChainIdentifiers, RunContext};

  fn license_state() -> WorkflowState {
    let mut event = LedgerEvent::pending(1, EventName::LicenseOfferCreated, BTreeMap::new());
    event.status = EventStatus::Completed;

    WorkflowState {
      is_active: false,
      is_complete: true,
      current_step: 1,
      events: vec![event],
      failure: None,
      run: Some(RunContext {
        run_id: "run-1".to_string(),
        mode: Mode::License,
        params: StartParams::License {
          licensed_emails: vec!["c@y.com".to_string()],
          monthly_fee: 50,
          license_template: "standard-v1".to_string(),
        },
        identifiers: ChainIdentifiers {
          dataset_id: "ds-abc123".to_string(),
          reference_id: "off-def456".to_string(),
          tx_hash: "0xfeed".to_string(),
          contract_address: "0xc0de".to_string(),
          issuer_address: "0xd00d".to_string(),
          explorer_url: "https://explorer.ledgerflow.dev/tx/0xfeed".to_string(),
        },
      }),
      ui: Default::default(),
    }
  }

  #[test]
  fn test_no_summary_before_any_run() {
    assert!(summary(&WorkflowState::idle()).is_none());
  }

  #[test]
  fn test_license_summary_carries_price_and_offer_id() {
    let doc = summary(&license_state()).unwrap();
    assert_eq!(doc["price"], 50);
    assert_eq!(doc["offer_id"], "off-def456");
    assert_eq!(doc["dataset_id"], "ds-abc123");
    assert_eq!(doc["events_logged"], 1);
    assert_eq!(doc["completed"], true);
  }

  #[test]
  fn test_summary_is_valid_json_text() {
    let doc = summary(&license_state()).unwrap();
    let text = serde_json::to_string_pretty(&doc).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["template"], "standard-v1");
  }
}
