use sea_orm::Database;
use serde_json::json;

use engine::{Engine, EngineError, FieldError, GroupDraft, PartyDraft, WalletDraft};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

#[tokio::test]
async fn users_get_unique_rotating_tokens() {
    let engine = engine_with_db().await;

    let alice = engine.create_user("alice").await.unwrap();
    let bob = engine.create_user("bob").await.unwrap();
    assert_ne!(alice.token, bob.token);
    assert_eq!(
        engine.create_user("alice").await,
        Err(EngineError::ExistingKey("alice".to_string()))
    );

    let found = engine.user_by_token(&alice.token).await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(alice.id));
    assert_eq!(engine.user_by_token("").await.unwrap(), None);

    let rotated = engine.rotate_user_token("alice").await.unwrap();
    assert_ne!(rotated.token, alice.token);
    assert_eq!(engine.user_by_token(&alice.token).await.unwrap(), None);
    assert_eq!(
        engine.rotate_user_token("carol").await,
        Err(EngineError::KeyNotFound("User".to_string()))
    );
}

#[tokio::test]
async fn groups_crud() {
    let engine = engine_with_db().await;

    let trip = engine
        .create_group(GroupDraft {
            name: Some(json!("Trip")),
            description: Some(Some(json!("Summer holidays"))),
        })
        .await
        .unwrap();
    assert_eq!(trip.description.as_deref(), Some("Summer holidays"));

    let renamed = engine
        .update_group(
            trip.id,
            GroupDraft {
                name: Some(json!("Trip 2024")),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Trip 2024");
    assert_eq!(renamed.description.as_deref(), Some("Summer holidays"));

    let cleared = engine
        .update_group(
            trip.id,
            GroupDraft {
                name: None,
                description: Some(None),
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.name, "Trip 2024");
    assert_eq!(cleared.description, None);

    assert_eq!(engine.list_groups(1).await.unwrap().items, vec![cleared]);

    engine.delete_group(trip.id).await.unwrap();
    assert_eq!(
        engine.group(trip.id).await,
        Err(EngineError::KeyNotFound("Group".to_string()))
    );
    assert_eq!(
        engine.create_group(GroupDraft::default()).await,
        Err(EngineError::Validation(vec![FieldError::new(
            "name",
            "The name field is required."
        )]))
    );
}

#[tokio::test]
async fn parties_default_to_the_caller() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice").await.unwrap();
    let bob = engine.create_user("bob").await.unwrap();

    let shop = engine
        .create_party(
            PartyDraft {
                name: Some(json!("Shop")),
                ..Default::default()
            },
            alice.id,
        )
        .await
        .unwrap();
    assert_eq!(shop.user_id, alice.id);

    let employer = engine
        .create_party(
            PartyDraft {
                name: Some(json!("Employer")),
                user_id: Some(json!(bob.id)),
                ..Default::default()
            },
            alice.id,
        )
        .await
        .unwrap();
    assert_eq!(employer.user_id, bob.id);

    assert_eq!(
        engine
            .create_party(
                PartyDraft {
                    name: None,
                    user_id: Some(json!(99)),
                    ..Default::default()
                },
                alice.id,
            )
            .await,
        Err(EngineError::Validation(vec![
            FieldError::new("name", "The name field is required."),
            FieldError::new("user_id", "The selected user_id is invalid."),
        ]))
    );

    let moved = engine
        .update_party(
            shop.id,
            PartyDraft {
                user_id: Some(json!(bob.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.user_id, bob.id);
    assert_eq!(moved.name, "Shop");

    assert_eq!(engine.list_parties(1).await.unwrap().total, 2);
    engine.delete_party(shop.id).await.unwrap();
    assert_eq!(
        engine.party(shop.id).await,
        Err(EngineError::KeyNotFound("Party".to_string()))
    );
}

#[tokio::test]
async fn wallets_require_a_type() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice").await.unwrap();

    assert_eq!(
        engine
            .create_wallet(
                WalletDraft {
                    name: Some(json!("Pocket")),
                    ..Default::default()
                },
                alice.id,
            )
            .await,
        Err(EngineError::Validation(vec![FieldError::new(
            "type",
            "The type field is required."
        )]))
    );

    let wallet = engine
        .create_wallet(
            WalletDraft {
                name: Some(json!("Pocket")),
                kind: Some(json!("cash")),
                description: Some(Some(json!("   "))),
                user_id: None,
            },
            alice.id,
        )
        .await
        .unwrap();
    assert_eq!(wallet.kind, "cash");
    assert_eq!(wallet.description, None);
    assert_eq!(wallet.user_id, alice.id);

    let updated = engine
        .update_wallet(
            wallet.id,
            WalletDraft {
                kind: Some(json!("bank")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.kind, "bank");
    assert_eq!(updated.name, "Pocket");

    assert_eq!(
        engine.update_wallet(42, WalletDraft::default()).await,
        Err(EngineError::KeyNotFound("Wallet".to_string()))
    );
    assert_eq!(engine.wallet(wallet.id).await.unwrap(), updated);
}

#[tokio::test]
async fn mistyped_fields_are_all_reported() {
    let engine = engine_with_db().await;
    let alice = engine.create_user("alice").await.unwrap();

    assert_eq!(
        engine
            .create_wallet(
                WalletDraft {
                    name: Some(json!(5)),
                    kind: Some(json!(["cash"])),
                    description: Some(Some(json!({"note": "x"}))),
                    user_id: Some(json!("someone")),
                },
                alice.id,
            )
            .await,
        Err(EngineError::Validation(vec![
            FieldError::new("name", "The name field must be a string."),
            FieldError::new("type", "The type field must be a string."),
            FieldError::new("description", "The description field must be a string."),
            FieldError::new("user_id", "The user_id field must be an integer."),
        ]))
    );

    let group = engine
        .create_group(GroupDraft {
            name: Some(json!("Trip")),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(
        engine
            .update_group(
                group.id,
                GroupDraft {
                    name: Some(json!(true)),
                    description: Some(Some(json!(12))),
                },
            )
            .await,
        Err(EngineError::Validation(vec![
            FieldError::new("name", "The name field must be a string."),
            FieldError::new("description", "The description field must be a string."),
        ]))
    );
    assert_eq!(engine.group(group.id).await.unwrap(), group);
    assert_eq!(engine.list_wallets(1).await.unwrap().total, 0);
}
