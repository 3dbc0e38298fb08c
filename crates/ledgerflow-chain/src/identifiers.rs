use ledgerflow_config::Mode;
use ledgerflow_workflow::ChainIdentifiers;
use rand::Rng;

/// Base URL of the simulated block explorer.
const EXPLORER_BASE: &str = "https://explorer.ledgerflow.dev";

/// Synthesize the identifier bag for a fresh run.
///
/// Deterministic in shape, random in value. A real registration backend
/// would return the same fields.
pub fn generate_identifiers(mode: Mode) -> ChainIdentifiers {
  let tx_hash = format!("0x{}", hex_string(32));
  let explorer_url = format!("{EXPLORER_BASE}/tx/{tx_hash}");

  ChainIdentifiers {
    dataset_id: format!("ds-{}", hex_string(6)),
    reference_id: format!("{}-{}", mode.reference_prefix(), hex_string(6)),
    tx_hash,
    contract_address: format!("0x{}", hex_string(20)),
    issuer_address: format!("0x{}", hex_string(20)),
    explorer_url,
  }
}

/// Lowercase hex of `bytes` random bytes. Non-cryptographic by design.
fn hex_string(bytes: usize) -> String {
  let mut rng = rand::rng();
  let mut out = String::with_capacity(bytes * 2);
  for _ in 0..bytes {
    let byte: u8 = rng.random();
    out.push_str(&format!("{byte:02x}"));
  }
  out
}
