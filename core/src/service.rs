//! Swap request orchestrator.
//!
//! Coordinates the item store, the request store, the user directory and the
//! notification channel for every swap-request command. All operations take
//! the authenticated user (the *actor*) explicitly.
//!
//! # Create
//!
//! ```text
//! validate ──► find offered ──► owner? ──► find requested ──► try_reserve
//!                                                                  │
//!                  notify recipient ◄── persist (pending) ◄────────┘
//!                                           │ error
//!                                           ▼
//!                                   release (best effort)
//! ```
//!
//! The reservation is taken before the request is written. If the write fails
//! the reservation is released once; a failed release is logged and counted
//! and the item stays reserved until an operator clears it.

use crate::config::ServiceConfig;
use crate::constants::{
    METRIC_COMPENSATIONS, METRIC_CONFLICTS, METRIC_CREATED, METRIC_NOTIFICATION_FAILURES,
    METRIC_TRANSITIONS,
};
use crate::environment::{Clock, SwapEnvironment, SystemClock};
use crate::error::{Result, SwapError};
use crate::notifications::SwapNotice;
use crate::providers::{ItemStore, Notifier, SwapRequestStore, UserDirectory};
use crate::reference::generate_reference_number;
use crate::types::{
    ItemId, NewSwapRequest, ReferenceNumber, SwapRequest, SwapRequestId, SwapStatus, UserId,
};
use tracing::{debug, error, info, warn};

/// Swap request orchestrator.
///
/// # Type Parameters
///
/// - `I`: Item store
/// - `S`: Swap request store
/// - `U`: User directory
/// - `N`: Notification channel
/// - `C`: Clock
#[derive(Clone)]
pub struct SwapRequestService<I, S, U, N, C = SystemClock>
where
    I: ItemStore + Clone,
    S: SwapRequestStore + Clone,
    U: UserDirectory + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    env: SwapEnvironment<I, S, U, N, C>,
    config: ServiceConfig,
}

impl<I, S, U, N, C> SwapRequestService<I, S, U, N, C>
where
    I: ItemStore + Clone,
    S: SwapRequestStore + Clone,
    U: UserDirectory + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    /// Create a new orchestrator.
    #[must_use]
    pub const fn new(env: SwapEnvironment<I, S, U, N, C>, config: ServiceConfig) -> Self {
        Self { env, config }
    }

    /// Injected collaborators.
    #[must_use]
    pub const fn env(&self) -> &SwapEnvironment<I, S, U, N, C> {
        &self.env
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════
    // Commands
    // ═══════════════════════════════════════════════════════════════════

    /// Propose a swap: `actor` offers one of their items for one of the
    /// recipient's.
    ///
    /// On success the offered item is reserved and the recipient is notified.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Validation`]: self-swap, same item on both sides, or the
    ///   requested item is not owned by the recipient
    /// - [`SwapError::ItemNotFound`]: either item is missing
    /// - [`SwapError::ItemAlreadyOffered`]: the offered item is reserved
    /// - [`SwapError::Unauthorized`]: `actor` does not own the offered item
    /// - Store errors from persisting the request
    #[tracing::instrument(
        skip_all,
        fields(
            sender = %actor,
            offered_item_id = %input.offered_item_id,
            requested_item_id = %input.requested_item_id,
        )
    )]
    pub async fn create(&self, actor: UserId, input: NewSwapRequest) -> Result<SwapRequest> {
        if actor == input.recipient_id {
            return Err(SwapError::Validation(
                "sender and recipient must be different users".to_string(),
            ));
        }
        if input.offered_item_id == input.requested_item_id {
            return Err(SwapError::Validation(
                "offered and requested item must be different".to_string(),
            ));
        }

        let offered = self.env.items.find_by_id(input.offered_item_id).await?;

        // Fast path; try_reserve below is the real guard
        if offered.reserved {
            metrics::counter!(METRIC_CONFLICTS).increment(1);
            return Err(SwapError::ItemAlreadyOffered(offered.id));
        }

        if offered.owner_id != actor {
            return Err(SwapError::unauthorized(
                "only the owner of the offered item can offer it",
            ));
        }

        let requested = self.env.items.find_by_id(input.requested_item_id).await?;
        if requested.owner_id != input.recipient_id {
            return Err(SwapError::Validation(
                "requested item does not belong to the recipient".to_string(),
            ));
        }

        if !self.env.items.try_reserve(offered.id).await? {
            metrics::counter!(METRIC_CONFLICTS).increment(1);
            debug!(item_id = %offered.id, "Lost reservation race");
            return Err(SwapError::ItemAlreadyOffered(offered.id));
        }

        let now = self.env.clock.now();
        let request = SwapRequest {
            id: SwapRequestId::new(),
            reference_number: generate_reference_number(self.config.reference_bytes),
            status: SwapStatus::Pending,
            offered_item_id: offered.id,
            requested_item_id: requested.id,
            sender_id: actor,
            recipient_id: input.recipient_id,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.env.requests.create(&request).await {
            error!(
                swap_request_id = %request.id,
                error = %e,
                "Failed to persist swap request"
            );
            // The store saw another open request for this item; it owns the flag
            if matches!(e, SwapError::ItemAlreadyOffered(_)) {
                metrics::counter!(METRIC_CONFLICTS).increment(1);
            } else {
                self.compensate_reservation(offered.id).await;
            }
            return Err(e);
        }

        metrics::counter!(METRIC_CREATED).increment(1);
        info!(
            swap_request_id = %request.id,
            reference = %request.reference_number,
            "Swap request created"
        );

        self.notify(
            SwapNotice::NewRequest,
            &request.reference_number,
            request.sender_id,
            request.recipient_id,
        )
        .await;

        Ok(request)
    }

    /// Answer or withdraw a pending request.
    ///
    /// `status` must be one of `accepted`, `rejected` (recipient only) or
    /// `cancelled` (sender only).
    ///
    /// # Errors
    ///
    /// - [`SwapError::Validation`]: unrecognised status (checked before any lookup)
    /// - [`SwapError::RequestNotFound`]: no such request
    /// - [`SwapError::Unauthorized`]: wrong participant for this transition
    /// - [`SwapError::InvalidTransition`]: the request is no longer pending
    /// - Store errors, including a failed release after reject/cancel
    #[tracing::instrument(skip_all, fields(actor = %actor, swap_request_id = %id, status = %status))]
    pub async fn update_status(
        &self,
        actor: UserId,
        id: SwapRequestId,
        status: &str,
    ) -> Result<SwapRequest> {
        let target = SwapStatus::parse_target(status)?;
        let request = self.env.requests.find_by_id(id).await?;

        authorize_transition(&request, actor, target)?;

        if request.status != SwapStatus::Pending {
            return Err(SwapError::InvalidTransition {
                from: request.status,
                to: target,
            });
        }

        if !self
            .env
            .requests
            .update_status(id, SwapStatus::Pending, target)
            .await?
        {
            let current = self.env.requests.find_by_id(id).await?;
            debug!(current = %current.status, "Concurrent transition won");
            return Err(SwapError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        metrics::counter!(METRIC_TRANSITIONS, "status" => target.as_str()).increment(1);
        info!(from = %request.status, to = %target, "Swap request status changed");

        match target {
            SwapStatus::Cancelled => {
                self.release_reservation(request.offered_item_id).await?;
            }
            SwapStatus::Rejected => {
                self.release_reservation(request.offered_item_id).await?;
                self.notify(
                    SwapNotice::Rejected,
                    &request.reference_number,
                    request.recipient_id,
                    request.sender_id,
                )
                .await;
            }
            SwapStatus::Accepted => {
                self.notify(
                    SwapNotice::Accepted,
                    &request.reference_number,
                    request.recipient_id,
                    request.sender_id,
                )
                .await;
            }
            SwapStatus::Pending => {}
        }

        self.env.requests.find_by_id(id).await
    }

    /// Withdraw and remove a request. Sender only.
    ///
    /// A pending request is cancelled and its item released before the row
    /// is removed; rejected and cancelled requests no longer hold a
    /// reservation. Accepted requests cannot be deleted.
    ///
    /// # Errors
    ///
    /// - [`SwapError::RequestNotFound`]: no such request
    /// - [`SwapError::Unauthorized`]: `actor` is not the sender
    /// - [`SwapError::RequestAccepted`]: the request was accepted
    /// - Store errors
    #[tracing::instrument(skip_all, fields(actor = %actor, swap_request_id = %id))]
    pub async fn delete(&self, actor: UserId, id: SwapRequestId) -> Result<()> {
        let request = self.env.requests.find_by_id(id).await?;

        if request.sender_id != actor {
            return Err(SwapError::unauthorized(
                "only the sender can delete a swap request",
            ));
        }

        match request.status {
            SwapStatus::Accepted => return Err(SwapError::RequestAccepted(id)),
            SwapStatus::Pending => {
                // Close the request before removing it so a concurrent accept
                // cannot slip in between
                let cancelled = self
                    .env
                    .requests
                    .update_status(id, SwapStatus::Pending, SwapStatus::Cancelled)
                    .await?;
                if cancelled {
                    // Released while the row still exists: a failed delete
                    // leaves a cancelled request and a free item
                    self.release_reservation(request.offered_item_id).await?;
                } else {
                    let current = self.env.requests.find_by_id(id).await?;
                    if current.status == SwapStatus::Accepted {
                        return Err(SwapError::RequestAccepted(id));
                    }
                }
            }
            SwapStatus::Rejected | SwapStatus::Cancelled => {}
        }

        self.env.requests.delete(id).await?;

        info!(was = %request.status, "Swap request deleted");

        self.notify(
            SwapNotice::Withdrawn,
            &request.reference_number,
            request.sender_id,
            request.recipient_id,
        )
        .await;

        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    /// Fetch a request the actor participates in.
    ///
    /// # Errors
    ///
    /// - [`SwapError::RequestNotFound`]: no such request
    /// - [`SwapError::Unauthorized`]: `actor` is neither sender nor recipient
    pub async fn get(&self, actor: UserId, id: SwapRequestId) -> Result<SwapRequest> {
        let request = self.env.requests.find_by_id(id).await?;
        ensure_participant(&request, actor)?;
        Ok(request)
    }

    /// Fetch a request by its reference number.
    ///
    /// # Errors
    ///
    /// Same as [`SwapRequestService::get`].
    pub async fn get_by_reference(
        &self,
        actor: UserId,
        reference: &ReferenceNumber,
    ) -> Result<SwapRequest> {
        let request = self.env.requests.find_by_reference(reference).await?;
        ensure_participant(&request, actor)?;
        Ok(request)
    }

    /// All requests the actor sent or received, newest first.
    ///
    /// # Errors
    ///
    /// Store errors.
    pub async fn list_by_user(&self, actor: UserId) -> Result<Vec<SwapRequest>> {
        self.env.requests.list_by_user(actor).await
    }

    /// The actor's requests in `status`, newest first.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Validation`]: unrecognised status
    /// - Store errors
    pub async fn list_by_status(&self, actor: UserId, status: &str) -> Result<Vec<SwapRequest>> {
        let status = status.parse::<SwapStatus>()?;
        let requests = self.env.requests.list_by_status(status).await?;
        Ok(requests.into_iter().filter(|r| r.involves(actor)).collect())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Effects
    // ═══════════════════════════════════════════════════════════════════

    async fn release_reservation(&self, item: ItemId) -> Result<()> {
        self.env.items.release(item).await.inspect_err(|e| {
            error!(item_id = %item, error = %e, "Failed to release item reservation");
        })
    }

    async fn compensate_reservation(&self, item: ItemId) {
        metrics::counter!(METRIC_COMPENSATIONS).increment(1);
        if let Err(e) = self.env.items.release(item).await {
            warn!(
                item_id = %item,
                error = %e,
                "Compensating release failed; item stays reserved"
            );
        }
    }

    /// Send `notice` to `recipient`, naming `actor` in the text.
    ///
    /// Never fails: delivery problems are logged and counted.
    async fn notify(
        &self,
        notice: SwapNotice,
        reference: &ReferenceNumber,
        actor: UserId,
        recipient: UserId,
    ) {
        if !self.config.notifications_enabled {
            return;
        }

        let profile = match self.env.users.find_by_id(recipient).await {
            Ok(profile) => profile,
            Err(e) => {
                metrics::counter!(METRIC_NOTIFICATION_FAILURES, "notice" => notice.as_str())
                    .increment(1);
                warn!(
                    user_id = %recipient,
                    notice = notice.as_str(),
                    error = %e,
                    "Cannot resolve notification recipient"
                );
                return;
            }
        };

        let actor_name = self.display_name(actor).await;
        let message = notice.compose(reference, &actor_name, profile.email);

        if let Err(e) = self.env.notifier.send(&message).await {
            metrics::counter!(METRIC_NOTIFICATION_FAILURES, "notice" => notice.as_str())
                .increment(1);
            warn!(
                user_id = %recipient,
                notice = notice.as_str(),
                error = %e,
                "Failed to deliver notification"
            );
        }
    }

    async fn display_name(&self, user: UserId) -> String {
        match self.env.users.find_by_id(user).await {
            Ok(profile) => profile.display_name,
            Err(e) => {
                debug!(user_id = %user, error = %e, "Using fallback display name");
                self.config.unknown_user_name.clone()
            }
        }
    }
}

fn authorize_transition(request: &SwapRequest, actor: UserId, target: SwapStatus) -> Result<()> {
    match target {
        SwapStatus::Cancelled if request.sender_id != actor => Err(SwapError::unauthorized(
            "only the sender can cancel a swap request",
        )),
        SwapStatus::Accepted | SwapStatus::Rejected if request.recipient_id != actor => {
            Err(SwapError::unauthorized(format!(
                "only the recipient can mark a swap request {target}"
            )))
        }
        _ => Ok(()),
    }
}

fn ensure_participant(request: &SwapRequest, actor: UserId) -> Result<()> {
    if request.involves(actor) {
        Ok(())
    } else {
        Err(SwapError::unauthorized(
            "only participants can view a swap request",
        ))
    }
}
