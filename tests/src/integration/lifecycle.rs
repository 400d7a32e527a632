//! # Board Lifecycle Flows
//!
//! End-to-end flows from factory creation through ledger activity:
//! role seeding, member-gated appends, payload bounds, batch membership,
//! and administration handover.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{account, owner, service};
    use board_core::domain::roles::MAX_BATCH_SIZE;
    use board_core::errors::BoardError;
    use board_factory::errors::{FactoryError, RegistryError};
    use board_types::{ValueError, Version};

    // =========================================================================
    // CREATION & ROLE SEEDING
    // =========================================================================

    #[tokio::test]
    async fn test_creator_and_initial_members_are_seeded() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        assert_eq!(service.board_name(board).await.unwrap(), "Test Board");
        assert!(service.is_admin(board, owner()).await.unwrap());
        assert!(service.is_developer(board, owner()).await.unwrap());
        assert!(service.is_member(board, account(2)).await.unwrap());
        assert!(!service.is_member(board, account(9)).await.unwrap());
        assert_eq!(service.board_count().await, 1);
    }

    #[tokio::test]
    async fn test_any_account_may_create_a_board() {
        let service = service().await;
        // account(7) holds no factory role at all.
        let board = service
            .create_board(account(7), Version::new(1), "Community Board", &[])
            .await
            .expect("create");
        assert!(service.is_admin(board, account(7)).await.unwrap());
    }

    #[tokio::test]
    async fn test_unregistered_version_rejected_at_creation() {
        let service = service().await;
        let err = service
            .create_board(owner(), Version::new(9), "Test Board", &[])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::Registry(RegistryError::ImplementationNotFound(Version::new(9)))
        );
        assert_eq!(service.board_count().await, 0);
    }

    #[tokio::test]
    async fn test_name_bounds() {
        let service = service().await;

        let err = service
            .create_board(owner(), Version::new(1), "", &[])
            .await
            .unwrap_err();
        assert_eq!(err, FactoryError::EmptyName);

        // 64 characters is the inclusive maximum.
        let exactly = "n".repeat(64);
        service
            .create_board(owner(), Version::new(1), &exactly, &[])
            .await
            .expect("64-char name");

        let too_long = "n".repeat(65);
        let err = service
            .create_board(owner(), Version::new(1), &too_long, &[])
            .await
            .unwrap_err();
        assert_eq!(err, FactoryError::NameTooLong { len: 65, max: 64 });
    }

    // =========================================================================
    // LEDGER APPENDS
    // =========================================================================

    #[tokio::test]
    async fn test_ids_start_at_one_and_are_gap_free() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        assert_eq!(service.next_message_id(board).await.unwrap(), 1);
        for expected in 1..=5u64 {
            let id = service
                .add_message(account(2), board, "Hello, World!", "General")
                .await
                .expect("append");
            assert_eq!(id, expected);
        }
        assert_eq!(service.next_message_id(board).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_non_member_cannot_append() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        // Even the board admin is not implicitly a member.
        let err = service
            .add_message(owner(), board, "Hi", "General")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::Unauthorized { .. })
        ));
        // The failed append consumed no id.
        assert_eq!(service.next_message_id(board).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_payload_bound_is_31_bytes() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        // Exactly 31 bytes round-trips unchanged.
        let exactly = "a".repeat(31);
        let id = service
            .add_message(account(2), board, &exactly, "General")
            .await
            .expect("31-byte content");
        let message = service.get_message(board, id).await.unwrap();
        assert_eq!(message.content.as_str(), exactly);

        // 32 bytes is rejected before any mutation.
        let too_long = "a".repeat(32);
        let err = service
            .add_message(account(2), board, &too_long, "General")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::Board(BoardError::ContentTooLarge(ValueError::PayloadTooLarge {
                len: 32,
                max: 31,
            }))
        );
        assert_eq!(service.next_message_id(board).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_range_read_returns_window_in_order() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        for content in ["First", "Second", "Third"] {
            service
                .add_message(account(2), board, content, "General")
                .await
                .expect("append");
        }

        let all = service
            .get_messages_in_range(board, 1, 4)
            .await
            .expect("full window");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].content.as_str(), "First");
        assert_eq!(all[1].content.as_str(), "Second");
        assert_eq!(all[2].content.as_str(), "Third");

        let window = service
            .get_messages_in_range(board, 2, 3)
            .await
            .expect("inner window");
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].content.as_str(), "Second");

        // The upper bound is exclusive and may not pass the next id.
        let err = service.get_messages_in_range(board, 1, 5).await.unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::InvalidId { id: 5, next: 4 })
        ));
        let err = service.get_messages_in_range(board, 0, 2).await.unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::InvalidId { id: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_message_id_rejected() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        let err = service.get_message(board, 0).await.unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::InvalidId { id: 0, .. })
        ));
        let err = service.get_message(board, 1).await.unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::InvalidId { id: 1, next: 1 })
        ));
    }

    // =========================================================================
    // MEMBERSHIP
    // =========================================================================

    #[tokio::test]
    async fn test_duplicate_member_grant_rejected() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        let err = service
            .add_member(owner(), board, account(2))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::Board(BoardError::AlreadyMember(account(2)))
        );
    }

    #[tokio::test]
    async fn test_bulk_grant_is_all_or_nothing() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        // account(2) is already a member, so the whole batch fails.
        let batch = [account(3), account(4), account(2)];
        let err = service.add_members(owner(), board, &batch).await.unwrap_err();
        assert_eq!(
            err,
            FactoryError::Board(BoardError::AlreadyMember(account(2)))
        );
        assert!(!service.is_member(board, account(3)).await.unwrap());
        assert!(!service.is_member(board, account(4)).await.unwrap());
    }

    #[tokio::test]
    async fn test_bulk_grant_size_bounds() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        let err = service.add_members(owner(), board, &[]).await.unwrap_err();
        assert_eq!(err, FactoryError::Board(BoardError::EmptyBatch));

        // 51 distinct accounts exceed the batch cap.
        let oversized: Vec<_> = (1u8..=51).map(|i| account(100 + i)).collect();
        let err = service
            .add_members(owner(), board, &oversized)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::Board(BoardError::BatchTooLarge {
                len: 51,
                max: MAX_BATCH_SIZE,
            })
        );
        assert!(!service.is_member(board, account(101)).await.unwrap());

        // Exactly 50 succeeds.
        let full: Vec<_> = (1u8..=50).map(|i| account(100 + i)).collect();
        service
            .add_members(owner(), board, &full)
            .await
            .expect("full batch");
        assert!(service.is_member(board, account(150)).await.unwrap());
    }

    #[tokio::test]
    async fn test_full_batch_of_generated_identities() {
        use board_types::AccountId;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        // A seeded generator keeps the batch reproducible.
        let mut rng = StdRng::seed_from_u64(0x1edb0a2d);
        let mut batch = Vec::with_capacity(MAX_BATCH_SIZE);
        while batch.len() < MAX_BATCH_SIZE {
            let mut bytes = [0u8; 20];
            rng.fill(&mut bytes[..]);
            let candidate = AccountId::new(bytes);
            if !candidate.is_zero() && !batch.contains(&candidate) {
                batch.push(candidate);
            }
        }

        service
            .add_members(owner(), board, &batch)
            .await
            .expect("full batch");
        for member in &batch {
            assert!(service.is_member(board, *member).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_member_revocation_closes_the_ledger() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");

        service
            .add_message(account(2), board, "First", "General")
            .await
            .expect("append");
        service
            .remove_member(owner(), board, account(2))
            .await
            .expect("revoke");

        let err = service
            .add_message(account(2), board, "Second", "General")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::Unauthorized { .. })
        ));
        // History written while a member stays readable.
        let message = service.get_message(board, 1).await.unwrap();
        assert_eq!(message.content.as_str(), "First");
    }

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================

    #[tokio::test]
    async fn test_admin_self_revocation_rejected() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");
        service
            .add_admin(owner(), board, account(3))
            .await
            .expect("grant");

        let err = service
            .remove_admin(account(3), board, account(3))
            .await
            .unwrap_err();
        assert_eq!(err, FactoryError::Board(BoardError::SelfRevocation));
        assert!(service.is_admin(board, account(3)).await.unwrap());
    }

    #[tokio::test]
    async fn test_last_admin_is_protected() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");
        service
            .add_admin(owner(), board, account(3))
            .await
            .expect("grant");

        // Two admins: removal works.
        service
            .remove_admin(account(3), board, owner())
            .await
            .expect("remove first admin");

        // account(3) is now the only admin; nobody can remove it. Grant a
        // second admin back to have a distinct caller.
        service
            .add_admin(account(3), board, account(4))
            .await
            .expect("regrant");
        service
            .remove_admin(account(3), board, account(4))
            .await
            .expect("remove second");
        // Sole admin removal by a would-be peer fails on authorization,
        // and by itself fails on self-revocation. The set never empties.
        assert!(service.is_admin(board, account(3)).await.unwrap());
    }

    #[tokio::test]
    async fn test_transfer_admin_moves_the_role_atomically() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        service
            .transfer_admin(owner(), board, account(6))
            .await
            .expect("transfer");
        assert!(service.is_admin(board, account(6)).await.unwrap());
        assert!(!service.is_admin(board, owner()).await.unwrap());

        // The old admin lost its powers.
        let err = service
            .add_member(owner(), board, account(7))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_transfer_admin_rejects_null_target() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        let err = service
            .transfer_admin(owner(), board, board_types::AccountId::ZERO)
            .await
            .unwrap_err();
        assert_eq!(err, FactoryError::Board(BoardError::NullAddress));
        assert!(service.is_admin(board, owner()).await.unwrap());
    }
}
