//! Domain types for swap requests and the items they reference.

use crate::error::SwapError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub uuid::Uuid);

impl ItemId {
    /// Generate a new random `ItemId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapRequestId(pub uuid::Uuid);

impl SwapRequestId {
    /// Generate a new random `SwapRequestId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SwapRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SwapRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human-shareable code identifying a swap request.
///
/// Opaque to callers; see [`crate::reference`] for how it is generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceNumber(pub String);

impl ReferenceNumber {
    /// Borrow the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Swap Status
// ═══════════════════════════════════════════════════════════════════════

/// Lifecycle status of a swap request.
///
/// `Pending` is the only non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    /// Awaiting the recipient's answer.
    Pending,
    /// Recipient agreed; the offered item stays reserved.
    Accepted,
    /// Recipient declined.
    Rejected,
    /// Sender withdrew before an answer.
    Cancelled,
}

impl SwapStatus {
    /// Database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// No further transitions are allowed from a terminal status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether a request in this status keeps its offered item reserved.
    #[must_use]
    pub const fn holds_reservation(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Parse a status that a participant may request via `update_status`.
    ///
    /// Only `accepted`, `rejected` and `cancelled` are valid targets.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Validation`] for `pending` or any unknown value.
    pub fn parse_target(s: &str) -> Result<Self, SwapError> {
        match s.parse::<Self>()? {
            Self::Pending => Err(SwapError::Validation(
                "status 'pending' cannot be requested".to_string(),
            )),
            status => Ok(status),
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapStatus {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(SwapError::Validation(format!("unknown status '{other}'"))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Records
// ═══════════════════════════════════════════════════════════════════════

/// A proposal to exchange one item for another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Internal identifier.
    pub id: SwapRequestId,

    /// Shareable code, unique and immutable.
    pub reference_number: ReferenceNumber,

    /// Current status.
    pub status: SwapStatus,

    /// Item the sender gives up.
    pub offered_item_id: ItemId,

    /// Item the sender wants.
    pub requested_item_id: ItemId,

    /// Proposer; owns the offered item.
    pub sender_id: UserId,

    /// Responder; owns the requested item.
    pub recipient_id: UserId,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Whether `user` is the sender or the recipient.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.sender_id == user || self.recipient_id == user
    }
}

/// Input for creating a swap request.
///
/// The sender is the authenticated actor and is passed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSwapRequest {
    /// Item the sender offers.
    pub offered_item_id: ItemId,
    /// Item the sender asks for.
    pub requested_item_id: ItemId,
    /// Owner of the requested item.
    pub recipient_id: UserId,
}

/// A listed item, restricted to the fields the swap lifecycle needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item ID.
    pub id: ItemId,

    /// Owner.
    pub owner_id: UserId,

    /// Display name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Picture location.
    pub picture_url: String,

    /// True while the item is offered in a pending or accepted request.
    pub reserved: bool,

    /// Created timestamp.
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of an item's descriptive fields.
///
/// `None` leaves a field untouched. The reservation flag is not part of this
/// struct; it only changes through `try_reserve` and `release`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New picture location.
    pub picture_url: Option<String>,
}

impl ItemUpdate {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.picture_url.is_none()
    }

    /// Apply the set fields to `item`.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(picture_url) = &self.picture_url {
            item.picture_url.clone_from(picture_url);
        }
    }
}

/// What the user directory knows about a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: UserId,
    /// Name shown in notifications.
    pub display_name: String,
    /// Where notifications go.
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_target_accepts_only_answer_statuses(
            s in prop_oneof![
                Just("accepted".to_string()),
                Just("rejected".to_string()),
                Just("cancelled".to_string()),
                Just("pending".to_string()),
                "\\PC{0,12}",
            ]
        ) {
            let parsed = SwapStatus::parse_target(&s);
            let expected = matches!(s.as_str(), "accepted" | "rejected" | "cancelled");
            prop_assert_eq!(parsed.is_ok(), expected);
            if let Ok(status) = parsed {
                prop_assert_eq!(status.as_str(), s.as_str());
            }
        }
    }

    #[test]
    fn test_status_round_trip_strings() {
        for status in [
            SwapStatus::Pending,
            SwapStatus::Accepted,
            SwapStatus::Rejected,
            SwapStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<SwapStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_parse_target_rejects_pending_and_garbage() {
        assert!(matches!(
            SwapStatus::parse_target("pending"),
            Err(SwapError::Validation(_))
        ));
        assert!(matches!(
            SwapStatus::parse_target("ACCEPTED"),
            Err(SwapError::Validation(_))
        ));
        assert_eq!(SwapStatus::parse_target("rejected"), Ok(SwapStatus::Rejected));
    }

    #[test]
    fn test_terminal_and_reservation() {
        assert!(!SwapStatus::Pending.is_terminal());
        assert!(SwapStatus::Accepted.is_terminal());
        assert!(SwapStatus::Accepted.holds_reservation());
        assert!(!SwapStatus::Rejected.holds_reservation());
        assert!(!SwapStatus::Cancelled.holds_reservation());
    }

    #[test]
    fn test_item_update_applies_only_set_fields() {
        let now = Utc::now();
        let mut item = Item {
            id: ItemId::new(),
            owner_id: UserId::new(),
            name: "Bike".into(),
            description: "Red".into(),
            picture_url: "bike.png".into(),
            reserved: true,
            created_at: now,
            updated_at: now,
        };

        let update = ItemUpdate {
            description: Some("Blue".into()),
            ..ItemUpdate::default()
        };
        assert!(!update.is_empty());
        update.apply_to(&mut item);

        assert_eq!(item.name, "Bike");
        assert_eq!(item.description, "Blue");
        assert!(item.reserved);
    }
}
