use crate::event::EventName;
use crate::mode::Mode;

use EventName::*;

/// Delay range for an ordinary simulated step, in milliseconds.
pub const DEFAULT_DELAY_MS: (u64, u64) = (800, 2000);

/// Delay range for expensive steps (token minting), in milliseconds.
pub const MINT_DELAY_MS: (u64, u64) = (2000, 5000);

/// Pause between run settlement and revealing the summary view.
pub const SETTLE_DELAY_MS: u64 = 500;

/// The fixed definition of one mode's workflow.
///
/// Length and name sequence are static per mode - a description of what a
/// real backend would emit, never derived from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeDef {
  pub mode: Mode,
  /// Ordered event vocabulary; run length N is this slice's length.
  pub event_names: &'static [EventName],
  /// Events that produce a user-visible notification on completion.
  pub notable: &'static [EventName],
  /// Events drawn from the slow delay range.
  pub slow: &'static [EventName],
  pub base_delay_ms: (u64, u64),
  pub slow_delay_ms: (u64, u64),
  pub settle_delay_ms: u64,
}

impl ModeDef {
  pub fn for_mode(mode: Mode) -> Self {
    let (event_names, notable): (&'static [EventName], &'static [EventName]) = match mode {
      Mode::Share => (
        &[ShareInvitationCreated, InvitationEmailSent],
        &[InvitationEmailSent],
      ),
      Mode::License => (
        &[
          LicenseOfferCreated,
          LicenseTermsRecorded,
          PaymentChannelOpened,
          LicenseTokenMinted,
          OfferEmailSent,
          LedgerAnchored,
        ],
        &[LicenseOfferCreated, LicenseTokenMinted, OfferEmailSent],
      ),
      Mode::FirmShare => (
        &[
          FirmWorkspaceCreated,
          FirmMembersResolved,
          GroupTokenMinted,
          AccessPolicyApplied,
          AdminNotified,
          LedgerAnchored,
        ],
        &[GroupTokenMinted, AdminNotified],
      ),
      Mode::CoopShare => (
        &[CoopListingPublished, RevenueSplitConfigured, ListingIndexed],
        &[CoopListingPublished],
      ),
    };

    Self {
      mode,
      event_names,
      notable,
      slow: &[LicenseTokenMinted, GroupTokenMinted],
      base_delay_ms: DEFAULT_DELAY_MS,
      slow_delay_ms: MINT_DELAY_MS,
      settle_delay_ms: SETTLE_DELAY_MS,
    }
  }

  /// Number of events in one run of this mode.
  pub fn event_count(&self) -> u32 {
    self.event_names.len() as u32
  }

  /// Delay range in milliseconds for the given event.
  pub fn delay_range_ms(&self, name: EventName) -> (u64, u64) {
    if self.slow.contains(&name) {
      self.slow_delay_ms
    } else {
      self.base_delay_ms
    }
  }

  pub fn is_notable(&self, name: EventName) -> bool {
    self.notable.contains(&name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fixed_lengths_per_mode() {
    assert_eq!(ModeDef::for_mode(Mode::Share).event_count(), 2);
    assert_eq!(ModeDef::for_mode(Mode::License).event_count(), 6);
    assert_eq!(ModeDef::for_mode(Mode::FirmShare).event_count(), 6);
    assert_eq!(ModeDef::for_mode(Mode::CoopShare).event_count(), 3);
  }

  #[test]
  fn test_share_sequence_is_stable() {
    let def = ModeDef::for_mode(Mode::Share);
    assert_eq!(
      def.event_names,
      &[ShareInvitationCreated, InvitationEmailSent]
    );
  }

  #[test]
  fn test_mint_events_use_slow_range() {
    let def = ModeDef::for_mode(Mode::License);
    assert_eq!(def.delay_range_ms(LicenseTokenMinted), MINT_DELAY_MS);
    assert_eq!(def.delay_range_ms(LicenseOfferCreated), DEFAULT_DELAY_MS);

    let firm = ModeDef::for_mode(Mode::FirmShare);
    assert_eq!(firm.delay_range_ms(GroupTokenMinted), MINT_DELAY_MS);
  }

  #[test]
  fn test_notable_names_are_in_vocabulary() {
    for mode in [Mode::Share, Mode::License, Mode::FirmShare, Mode::CoopShare] {
      let def = ModeDef::for_mode(mode);
      for name in def.notable {
        assert!(
          def.event_names.contains(name),
          "{name} is notable but not in {mode}'s vocabulary"
        );
      }
    }
  }
}
