//! # Event Flow Observation
//!
//! Subscribers on the bus must see exactly the committed mutations, in
//! order, with the acting identity attached. Rejected operations must
//! never surface as events.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{account, owner, service_with_bus};
    use board_bus::events::{BoardEvent, EventFilter, EventTopic};
    use board_types::Version;
    use std::time::Duration;
    use tokio::time::timeout;

    const RECV_TIMEOUT: Duration = Duration::from_secs(1);

    async fn next_event(
        subscription: &mut board_bus::subscriber::Subscription,
    ) -> BoardEvent {
        timeout(RECV_TIMEOUT, subscription.recv())
            .await
            .expect("timed out waiting for event")
            .expect("bus closed")
    }

    #[tokio::test]
    async fn test_creation_emits_board_created_then_member_added() {
        let (service, bus) = service_with_bus().await;
        let mut subscription = bus.subscribe(EventFilter::all());

        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        match next_event(&mut subscription).await {
            BoardEvent::BoardCreated {
                board: b,
                name,
                creator,
                version,
                ..
            } => {
                assert_eq!(b, board);
                assert_eq!(name, "Test Board");
                assert_eq!(creator, owner());
                assert_eq!(version, Version::new(1));
            }
            other => panic!("expected BoardCreated, got {other:?}"),
        }
        match next_event(&mut subscription).await {
            BoardEvent::MemberAdded { member, admin, .. } => {
                assert_eq!(member, account(2));
                assert_eq!(admin, owner());
            }
            other => panic!("expected MemberAdded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_append_emits_message_added_with_payload() {
        let (service, bus) = service_with_bus().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        let mut subscription = bus.subscribe(EventFilter::topics(vec![EventTopic::Messages]));
        service
            .add_message(account(2), board, "Hello, World!", "General")
            .await
            .expect("append");

        match next_event(&mut subscription).await {
            BoardEvent::MessageAdded {
                board: b,
                id,
                sender,
                content,
                topic,
                ..
            } => {
                assert_eq!(b, board);
                assert_eq!(id, 1);
                assert_eq!(sender, account(2));
                assert_eq!(content, "Hello, World!");
                assert_eq!(topic, "General");
            }
            other => panic!("expected MessageAdded, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_emit_events_in_id_order() {
        let (service, bus) = service_with_bus().await;
        let service = std::sync::Arc::new(service);
        let members: Vec<_> = (1u8..=8).map(|i| account(30 + i)).collect();
        let board = service
            .create_board(owner(), Version::new(1), "Busy Board", &members)
            .await
            .expect("create");

        let mut subscription = bus.subscribe(EventFilter::topics(vec![EventTopic::Messages]));

        let mut writers = Vec::new();
        for &member in &members {
            let service = std::sync::Arc::clone(&service);
            writers.push(tokio::spawn(async move {
                for n in 0..5 {
                    let content = format!("m{n}");
                    service
                        .add_message(member, board, &content, "General")
                        .await
                        .expect("append");
                }
            }));
        }
        for writer in writers {
            writer.await.expect("task");
        }

        // Arrival order on the bus matches assignment order in the ledger.
        for expected in 1..=40u64 {
            match next_event(&mut subscription).await {
                BoardEvent::MessageAdded { id, .. } => assert_eq!(id, expected),
                other => panic!("expected MessageAdded, got {other:?}"),
            }
        }
        assert!(matches!(subscription.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_rejected_operations_emit_nothing() {
        let (service, bus) = service_with_bus().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        let mut subscription = bus.subscribe(EventFilter::all());
        service
            .add_message(account(9), board, "Hi", "General")
            .await
            .unwrap_err();
        service
            .add_member(account(9), board, account(3))
            .await
            .unwrap_err();

        assert!(matches!(subscription.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_upgrade_emits_old_and_new_version() {
        let (service, bus) = service_with_bus().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        let mut subscription = bus.subscribe(EventFilter::topics(vec![EventTopic::Upgrades]));
        service
            .upgrade_board(owner(), board, Version::new(2))
            .await
            .expect("upgrade");

        match next_event(&mut subscription).await {
            BoardEvent::BoardUpgraded {
                board: b,
                developer,
                old_version,
                new_version,
                ..
            } => {
                assert_eq!(b, board);
                assert_eq!(developer, owner());
                assert_eq!(old_version, Version::new(1));
                assert_eq!(new_version, Version::new(2));
            }
            other => panic!("expected BoardUpgraded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_board_filter_isolates_boards() {
        let (service, bus) = service_with_bus().await;
        let mine = service
            .create_board(owner(), Version::new(1), "Board A", &[account(2)])
            .await
            .expect("a");
        let other = service
            .create_board(owner(), Version::new(1), "Board B", &[account(2)])
            .await
            .expect("b");

        let mut subscription = bus.subscribe(EventFilter::board(mine));
        service
            .add_message(account(2), other, "Elsewhere", "General")
            .await
            .expect("other board");
        service
            .add_message(account(2), mine, "Here", "General")
            .await
            .expect("my board");

        // Only the event for the filtered board comes through.
        match next_event(&mut subscription).await {
            BoardEvent::MessageAdded { board, content, .. } => {
                assert_eq!(board, mine);
                assert_eq!(content, "Here");
            }
            other => panic!("expected MessageAdded, got {other:?}"),
        }
        assert!(matches!(subscription.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_administration_events_carry_actors() {
        let (service, bus) = service_with_bus().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        let mut subscription =
            bus.subscribe(EventFilter::topics(vec![EventTopic::Administration]));

        service
            .add_admin(owner(), board, account(3))
            .await
            .expect("grant");
        // Idempotent re-grant changes nothing and emits nothing.
        service
            .add_admin(owner(), board, account(3))
            .await
            .expect("regrant");
        service
            .transfer_admin(account(3), board, account(4))
            .await
            .expect("transfer");

        match next_event(&mut subscription).await {
            BoardEvent::AdminGranted { granter, admin, .. } => {
                assert_eq!(granter, owner());
                assert_eq!(admin, account(3));
            }
            other => panic!("expected AdminGranted, got {other:?}"),
        }
        match next_event(&mut subscription).await {
            BoardEvent::AdminTransferred {
                previous,
                new_admin,
                ..
            } => {
                assert_eq!(previous, account(3));
                assert_eq!(new_admin, account(4));
            }
            other => panic!("expected AdminTransferred, got {other:?}"),
        }
        assert!(matches!(subscription.try_recv(), Ok(None)));
    }
}
