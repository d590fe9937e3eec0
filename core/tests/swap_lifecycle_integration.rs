//! Integration tests for the swap-request lifecycle using in-memory providers.

#![allow(clippy::expect_used)] // Test code uses expect for clear failure messages

use std::sync::Arc;
use swapp_core::{
    config::ServiceConfig,
    environment::SwapEnvironment,
    mocks::{MockItemStore, MockNotifier, MockSwapRequestStore, MockUserDirectory},
    service::SwapRequestService,
    types::{Item, NewSwapRequest, SwapStatus, UserId},
    SwapError,
};

type Service =
    SwapRequestService<MockItemStore, MockSwapRequestStore, MockUserDirectory, MockNotifier>;

struct Marketplace {
    items: MockItemStore,
    requests: MockSwapRequestStore,
    users: MockUserDirectory,
    notifier: MockNotifier,
}

impl Marketplace {
    fn new() -> Self {
        Self {
            items: MockItemStore::new(),
            requests: MockSwapRequestStore::new(),
            users: MockUserDirectory::new(),
            notifier: MockNotifier::new(),
        }
    }

    /// A service instance over the shared stores.
    fn instance(&self) -> Service {
        let env = SwapEnvironment::new(
            self.items.clone(),
            self.requests.clone(),
            self.users.clone(),
            self.notifier.clone(),
        );
        SwapRequestService::new(env, ServiceConfig::default())
    }

    fn member(&self, name: &str) -> (UserId, Item) {
        let email = format!("{}@example.com", name.to_lowercase());
        let user = self.users.add_user(name, email);
        let item = self.items.add_item(user, format!("{name}'s item"));
        (user, item)
    }
}

fn offer(offered: &Item, requested: &Item) -> NewSwapRequest {
    NewSwapRequest {
        offered_item_id: offered.id,
        requested_item_id: requested.id,
        recipient_id: requested.owner_id,
    }
}

#[tokio::test]
async fn test_reject_then_reoffer_flow() {
    let market = Marketplace::new();
    let service = market.instance();
    let (u1, i1) = market.member("Ada");
    let (u2, i2) = market.member("Bob");

    // Create succeeds
    let first = service.create(u1, offer(&i1, &i2)).await.expect("first create");
    assert_eq!(first.status, SwapStatus::Pending);

    // Second create on the same item conflicts
    let second = service.create(u1, offer(&i1, &i2)).await;
    assert!(matches!(second, Err(SwapError::ItemAlreadyOffered(id)) if id == i1.id));

    // Recipient rejects; the item is free again
    let rejected = service
        .update_status(u2, first.id, "rejected")
        .await
        .expect("reject");
    assert_eq!(rejected.status, SwapStatus::Rejected);
    assert!(!market.items.is_reserved(i1.id));

    // Third create succeeds
    let third = service.create(u1, offer(&i1, &i2)).await.expect("third create");
    assert!(market.items.is_reserved(i1.id));

    // Bob saw two offers, Ada saw one rejection
    assert_eq!(market.notifier.sent_to("bob@example.com").len(), 2);
    assert_eq!(market.notifier.sent_to("ada@example.com").len(), 1);

    // Listings
    let ada_requests = service.list_by_user(u1).await.expect("list");
    assert_eq!(ada_requests.len(), 2);
    let pending = service.list_by_status(u2, "pending").await.expect("list");
    assert_eq!(pending.iter().map(|r| r.id).collect::<Vec<_>>(), vec![third.id]);
}

#[tokio::test]
async fn test_accepted_swap_is_final() {
    let market = Marketplace::new();
    let service = market.instance();
    let (u1, i1) = market.member("Ada");
    let (u2, i2) = market.member("Bob");
    let (u3, i3) = market.member("Cy");

    let request = service.create(u1, offer(&i1, &i2)).await.expect("create");
    service
        .update_status(u2, request.id, "accepted")
        .await
        .expect("accept");

    // Item stays promised: nobody can offer it again
    assert!(matches!(
        service.create(u1, offer(&i1, &i3)).await,
        Err(SwapError::ItemAlreadyOffered(_))
    ));

    // The exchange cannot be undone
    assert!(matches!(
        service.update_status(u1, request.id, "cancelled").await,
        Err(SwapError::InvalidTransition { .. })
    ));
    assert!(matches!(
        service.delete(u1, request.id).await,
        Err(SwapError::RequestAccepted(_))
    ));

    // The requested item was never reserved and can still be offered by Bob
    service
        .create(u2, offer(&i2, &i3))
        .await
        .expect("recipient offers own item elsewhere");

    // Outsiders cannot look at the request
    assert!(matches!(
        service.get_by_reference(u3, &request.reference_number).await,
        Err(SwapError::Unauthorized { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_competing_instances_reserve_once() {
    let market = Marketplace::new();
    let (owner, offered) = market.member("Ada");
    let recipients: Vec<(UserId, Item)> = (0..8)
        .map(|n| market.member(&format!("Peer{n}")))
        .collect();

    let handles: Vec<_> = recipients
        .iter()
        .map(|(_, wanted)| {
            // Each task runs its own orchestrator over the shared stores
            let service = Arc::new(market.instance());
            let input = offer(&offered, wanted);
            tokio::spawn(async move { service.create(owner, input).await })
        })
        .collect();

    let mut created = Vec::new();
    for handle in handles {
        match handle.await.expect("task completes") {
            Ok(request) => created.push(request),
            Err(e) => assert!(matches!(e, SwapError::ItemAlreadyOffered(_)), "{e}"),
        }
    }

    assert_eq!(created.len(), 1);
    assert_eq!(market.requests.len(), 1);
    assert!(market.items.is_reserved(offered.id));

    let open = market
        .requests
        .all()
        .into_iter()
        .filter(|r| r.offered_item_id == offered.id && r.status.holds_reservation())
        .count();
    assert_eq!(open, 1);
}

#[tokio::test]
async fn test_withdraw_notifies_and_frees_item() {
    let market = Marketplace::new();
    let service = market.instance();
    let (u1, i1) = market.member("Ada");
    let (_, i2) = market.member("Bob");

    let request = service.create(u1, offer(&i1, &i2)).await.expect("create");
    service.delete(u1, request.id).await.expect("delete");

    assert!(!market.items.is_reserved(i1.id));
    assert!(market.requests.is_empty());

    let bob_mail = market.notifier.sent_to("bob@example.com");
    assert_eq!(
        bob_mail.last().map(|n| n.subject.clone()),
        Some(format!(
            "Swap request with reference {} has been cancelled",
            request.reference_number
        ))
    );
}
