use serde::{Deserialize, Serialize};

/// Symbolic event names, one fixed vocabulary per mode.
///
/// The sequence an event name appears in is defined by [`crate::ModeDef`];
/// this enum is the union of all vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
  // Share
  ShareInvitationCreated,
  InvitationEmailSent,

  // License
  LicenseOfferCreated,
  LicenseTermsRecorded,
  PaymentChannelOpened,
  LicenseTokenMinted,
  OfferEmailSent,

  // Firm-Share
  FirmWorkspaceCreated,
  FirmMembersResolved,
  GroupTokenMinted,
  AccessPolicyApplied,
  AdminNotified,

  // Co-op-Share
  CoopListingPublished,
  RevenueSplitConfigured,
  ListingIndexed,

  // Shared terminal anchor step (License and Firm-Share)
  LedgerAnchored,
}

impl EventName {
  pub fn as_str(&self) -> &'static str {
    match self {
      EventName::ShareInvitationCreated => "ShareInvitationCreated",
      EventName::InvitationEmailSent => "InvitationEmailSent",
      EventName::LicenseOfferCreated => "LicenseOfferCreated",
      EventName::LicenseTermsRecorded => "LicenseTermsRecorded",
      EventName::PaymentChannelOpened => "PaymentChannelOpened",
      EventName::LicenseTokenMinted => "LicenseTokenMinted",
      EventName::OfferEmailSent => "OfferEmailSent",
      EventName::FirmWorkspaceCreated => "FirmWorkspaceCreated",
      EventName::FirmMembersResolved => "FirmMembersResolved",
      EventName::GroupTokenMinted => "GroupTokenMinted",
      EventName::AccessPolicyApplied => "AccessPolicyApplied",
      EventName::AdminNotified => "AdminNotified",
      EventName::CoopListingPublished => "CoopListingPublished",
      EventName::RevenueSplitConfigured => "RevenueSplitConfigured",
      EventName::ListingIndexed => "ListingIndexed",
      EventName::LedgerAnchored => "LedgerAnchored",
    }
  }

  /// Human-readable form, used as a notification title.
  pub fn title(&self) -> &'static str {
    match self {
      EventName::ShareInvitationCreated => "Share invitation created",
      EventName::InvitationEmailSent => "Invitation email sent",
      EventName::LicenseOfferCreated => "License offer created",
      EventName::LicenseTermsRecorded => "License terms recorded",
      EventName::PaymentChannelOpened => "Payment channel opened",
      EventName::LicenseTokenMinted => "License token minted",
      EventName::OfferEmailSent => "Offer email sent",
      EventName::FirmWorkspaceCreated => "Firm workspace created",
      EventName::FirmMembersResolved => "Firm members resolved",
      EventName::GroupTokenMinted => "Group token minted",
      EventName::AccessPolicyApplied => "Access policy applied",
      EventName::AdminNotified => "Admin notified",
      EventName::CoopListingPublished => "Co-op listing published",
      EventName::RevenueSplitConfigured => "Revenue split configured",
      EventName::ListingIndexed => "Listing indexed",
      EventName::LedgerAnchored => "Anchored to ledger",
    }
  }
}

impl std::fmt::Display for EventName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
