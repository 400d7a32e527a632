//! # Upgrade Flows
//!
//! Proves the core upgrade contract: a rebind changes behavior and
//! nothing else. State accumulated under the old version must survive
//! byte-for-byte, and version-gated operations must flip from rejected
//! to supported at exactly the rebind boundary.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{account, owner, service};
    use board_core::errors::BoardError;
    use board_factory::errors::{FactoryError, RegistryError};
    use board_types::Version;

    #[tokio::test]
    async fn test_upgrade_preserves_ledger_and_roles() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2), account(3)])
            .await
            .expect("create");
        for content in ["First", "Second", "Third"] {
            service
                .add_message(account(2), board, content, "General")
                .await
                .expect("append");
        }
        service
            .remove_member(owner(), board, account(3))
            .await
            .expect("revoke");

        let old = service
            .upgrade_board(owner(), board, Version::new(2))
            .await
            .expect("upgrade");
        assert_eq!(old, Version::new(1));
        assert_eq!(service.board_version(board).await.unwrap(), Version::new(2));

        // Ledger history intact, id sequence continues where it left off.
        for (id, content) in [(1, "First"), (2, "Second"), (3, "Third")] {
            let message = service.get_message(board, id).await.unwrap();
            assert_eq!(message.content.as_str(), content);
            assert_eq!(message.sender, account(2));
        }
        assert_eq!(service.next_message_id(board).await.unwrap(), 4);
        let id = service
            .add_message(account(2), board, "Fourth", "General")
            .await
            .expect("post-upgrade append");
        assert_eq!(id, 4);

        // Role history intact too: the revocation survived.
        assert!(service.is_member(board, account(2)).await.unwrap());
        assert!(!service.is_member(board, account(3)).await.unwrap());
        assert!(service.is_admin(board, owner()).await.unwrap());
    }

    #[tokio::test]
    async fn test_comments_flip_on_at_the_rebind_boundary() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[account(2)])
            .await
            .expect("create");
        service
            .add_message(account(2), board, "Commentable", "General")
            .await
            .expect("append");

        // Before: every comment operation is version-rejected.
        let err = service
            .add_comment(account(2), board, 1, "First!")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::Board(BoardError::UnsupportedOperation {
                operation: "add_comment",
                version: Version::new(1),
            })
        );
        let err = service.comment_count(board, 1).await.unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::UnsupportedOperation { .. })
        ));

        service
            .upgrade_board(owner(), board, Version::new(2))
            .await
            .expect("upgrade");

        // After: comments work and are anchored to real messages only.
        let index = service
            .add_comment(account(2), board, 1, "First!")
            .await
            .expect("comment");
        assert_eq!(index, 0);
        let comment = service.get_comment(board, 1, 0).await.unwrap();
        assert_eq!(comment.author, account(2));
        assert_eq!(comment.content.as_str(), "First!");
        assert_eq!(service.comment_count(board, 1).await.unwrap(), 1);

        let err = service
            .add_comment(account(2), board, 99, "Dangling")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::InvalidId { id: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_comments_remain_member_gated_after_upgrade() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(2), "Test Board", &[account(2)])
            .await
            .expect("create");
        service
            .add_message(account(2), board, "Commentable", "General")
            .await
            .expect("append");

        let err = service
            .add_comment(account(9), board, 1, "Drive-by")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Board(BoardError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_upgrade_to_unregistered_version_leaves_binding_intact() {
        let service = service().await;
        let board = service
            .create_board(owner(), Version::new(1), "Test Board", &[])
            .await
            .expect("create");

        let err = service
            .upgrade_board(owner(), board, Version::new(9))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::Registry(RegistryError::ImplementationNotFound(Version::new(9)))
        );
        assert_eq!(service.board_version(board).await.unwrap(), Version::new(1));
    }

    #[tokio::test]
    async fn test_board_admin_cannot_self_upgrade() {
        let service = service().await;
        let board = service
            .create_board(account(7), Version::new(1), "Community Board", &[])
            .await
            .expect("create");

        // account(7) is admin AND developer of its own board, but holds no
        // factory role, so the upgrade gate rejects it.
        let err = service
            .upgrade_board(account(7), board, Version::new(2))
            .await
            .unwrap_err();
        assert_eq!(err, FactoryError::Unauthorized { caller: account(7) });
        assert_eq!(service.board_version(board).await.unwrap(), Version::new(1));
    }

    #[tokio::test]
    async fn test_upgrades_are_per_board() {
        let service = service().await;
        let upgraded = service
            .create_board(owner(), Version::new(1), "Board A", &[])
            .await
            .expect("a");
        let untouched = service
            .create_board(owner(), Version::new(1), "Board B", &[])
            .await
            .expect("b");

        service
            .upgrade_board(owner(), upgraded, Version::new(2))
            .await
            .expect("upgrade");

        assert_eq!(
            service.board_version(upgraded).await.unwrap(),
            Version::new(2)
        );
        assert_eq!(
            service.board_version(untouched).await.unwrap(),
            Version::new(1)
        );
    }

    #[tokio::test]
    async fn test_duplicate_version_registration_rejected() {
        let service = service().await;
        let err = service
            .register_implementation(
                owner(),
                Version::new(1),
                Some(std::sync::Arc::new(board_core::behavior::BoardV2)),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::Registry(RegistryError::VersionExists(Version::new(1)))
        );
        // The original mapping still resolves.
        assert!(service.is_version_registered(Version::new(1)).await);
    }

    #[tokio::test]
    async fn test_null_implementation_rejected() {
        let service = service().await;
        let err = service
            .register_implementation(owner(), Version::new(3), None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FactoryError::Registry(RegistryError::NullImplementation)
        );
        assert!(!service.is_version_registered(Version::new(3)).await);
    }
}
