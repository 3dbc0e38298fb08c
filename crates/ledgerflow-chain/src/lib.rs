//! Ledgerflow Chain
//!
//! Synthesizes the mock on-chain material for a simulated run: identifiers
//! (dataset id, transaction hash, addresses, explorer URL) and the fixed,
//! mode-specific list of pending ledger events.
//!
//! Everything here is pure apart from non-cryptographic randomness for the
//! fake hex material. This crate is the designed integration seam: swapping
//! these generators for a real backend client that returns the same shapes
//! is the single change needed to make the workflow engine production-real.

mod events;
mod identifiers;

pub use events::build_events;
pub use identifiers::generate_identifiers;

use ledgerflow_config::{ModeDef, ParamError, StartParams};
use ledgerflow_workflow::{ChainIdentifiers, LedgerEvent};

/// Validate parameters and synthesize everything a fresh run needs.
///
/// This is the one failure injection point before a run starts: bad
/// parameters are rejected here and no state is touched.
pub fn prepare_run(
  def: &ModeDef,
  params: &StartParams,
) -> Result<(ChainIdentifiers, Vec<LedgerEvent>), ParamError> {
  params.validate()?;
  let identifiers = generate_identifiers(def.mode);
  let events = build_events(def, params, &identifiers);
  Ok((identifiers, events))
}

#[cfg(test)]
mod tests {
  use ledgerflow_config::Mode;
  use ledgerflow_workflow::validate_events;

  use super::*;

  #[test]
  fn test_prepare_run_rejects_invalid_params() {
    let def = ModeDef::for_mode(Mode::Share);
    let params = StartParams::Share {
      shared_emails: vec![],
    };
    assert_eq!(prepare_run(&def, &params), Err(ParamError::NoRecipients));
  }

  #[test]
  fn test_prepare_run_yields_valid_pending_list() {
    let def = ModeDef::for_mode(Mode::CoopShare);
    let params = StartParams::CoopShare {
      price_usdc: 250,
      member_count: 3,
    };
    let (identifiers, events) = prepare_run(&def, &params).unwrap();

    assert_eq!(events.len(), 3);
    assert!(validate_events(&events).is_ok());
    assert!(identifiers.reference_id.starts_with("coop-"));
  }
}
