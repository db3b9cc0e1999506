//! Repository and credential behavior against the in-memory store.
//!
//! Covers upsert-by-id saves, metadata edits, deletes, ownership-filtered
//! listing and the login double lookup.

mod common;

use atelier_core::prelude::*;
use atelier_memory::MemoryStore;
use common::{ALICE_PASSWORD, caller, create_account, create_category};

fn save(id: &str, name: &str, data: &str) -> SavePrefab {
    SavePrefab {
        id: id.to_string(),
        name: name.to_string(),
        data: data.to_string(),
    }
}

async fn stored(store: &MemoryStore, id: ObjectId) -> PrefabRecord {
    let doc = store
        .find_one(PrefabRecord::COLLECTION, &Filter::id(&id))
        .await
        .unwrap()
        .expect("prefab should exist");
    PrefabRecord::from_document(doc).unwrap()
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_save_without_id_creates_one_record() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());

    let outcome = repo.save(&save("", "Chair", "{}"), None, false).await.unwrap();

    assert!(matches!(outcome, SaveOutcome::Created(_)));
    assert_eq!(store.len(PrefabRecord::COLLECTION).await, 1);

    let record = stored(&store, outcome.id()).await;
    assert_eq!(record.name, "Chair");
    assert_eq!(record.create_time, record.update_time);
    assert!(!record.total_pinyin.is_empty());
    assert!(!record.first_pinyin.is_empty());
    assert_eq!(record.owner_id, None);
}

#[tokio::test]
async fn test_save_rejects_empty_name() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());

    let err = repo.save(&save("", "   ", "{}"), None, false).await.unwrap_err();

    assert!(matches!(err, PrefabError::Validation(_)));
    assert_eq!(err.to_string(), "Name is not allowed to be empty.");
    assert_eq!(store.len(PrefabRecord::COLLECTION).await, 0);
}

#[tokio::test]
async fn test_save_existing_id_only_touches_data() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    let id = repo
        .save(&save("", "中国", "v1"), None, false)
        .await
        .unwrap()
        .id();
    let before = stored(&store, id).await;

    let outcome = repo
        .save(&save(&id.to_string(), "Renamed", "v2"), None, false)
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome::Updated(id));
    let after = stored(&store, id).await;
    assert_eq!(after.name, "中国");
    assert_eq!(after.total_pinyin, "zhongguo");
    assert_eq!(after.first_pinyin, "zg");
    assert_eq!(after.data, "v2");
    assert_eq!(after.create_time, before.create_time);
    assert!(after.update_time >= before.update_time);
    assert_eq!(store.len(PrefabRecord::COLLECTION).await, 1);
}

#[tokio::test]
async fn test_save_unknown_or_malformed_id_creates() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    let unknown = ObjectId::new().to_string();

    let a = repo.save(&save(&unknown, "A", ""), None, false).await.unwrap();
    let b = repo.save(&save("garbage", "B", ""), None, false).await.unwrap();

    assert!(matches!(a, SaveOutcome::Created(_)));
    assert!(matches!(b, SaveOutcome::Created(_)));
    assert_ne!(a.id().to_string(), unknown);
    assert_eq!(store.len(PrefabRecord::COLLECTION).await, 2);
}

#[tokio::test]
async fn test_save_sets_owner_only_with_authority() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    let alice = create_account(&store, "alice", "Alice", ALICE_PASSWORD).await;
    let alice = caller(&alice, false);

    let owned = repo
        .save(&save("", "Owned", ""), Some(&alice), true)
        .await
        .unwrap();
    let unowned = repo
        .save(&save("", "Unowned", ""), Some(&alice), false)
        .await
        .unwrap();
    let anonymous = repo.save(&save("", "Anon", ""), None, true).await.unwrap();

    assert_eq!(stored(&store, owned.id()).await.owner_id, Some(alice.id));
    assert_eq!(stored(&store, unowned.id()).await.owner_id, None);
    assert_eq!(stored(&store, anonymous.id()).await.owner_id, None);
}

// ---------------------------------------------------------------------------
// Get / Edit / Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_returns_payload() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store);
    let id = repo
        .save(&save("", "Lamp", "{\"mesh\":1}"), None, false)
        .await
        .unwrap()
        .id();

    let detail = repo.get(&id.to_string()).await.unwrap();

    assert_eq!(detail.id, id.to_string());
    assert_eq!(detail.name, "Lamp");
    assert_eq!(detail.data, "{\"mesh\":1}");
    assert_eq!(detail.category_id, "");
}

#[tokio::test]
async fn test_get_unknown_and_malformed_ids() {
    let repo = PrefabRepository::new(MemoryStore::new());

    let missing = repo.get(&ObjectId::new().to_string()).await.unwrap_err();
    let malformed = repo.get("nope").await.unwrap_err();

    assert!(matches!(missing, PrefabError::NotFound(_)));
    assert!(matches!(malformed, PrefabError::Validation(_)));
}

#[tokio::test]
async fn test_edit_renames_and_reindexes() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    let id = repo.save(&save("", "Box", "d"), None, false).await.unwrap().id();

    repo.edit(&EditPrefab {
        id: id.to_string(),
        name: " 中国 ".into(),
        thumbnail: "thumb.png".into(),
        category: "c1".into(),
    })
    .await
    .unwrap();

    let record = stored(&store, id).await;
    assert_eq!(record.name, "中国");
    assert_eq!(record.total_pinyin, "zhongguo");
    assert_eq!(record.first_pinyin, "zg");
    assert_eq!(record.thumbnail.as_deref(), Some("thumb.png"));
    assert_eq!(record.category_id.as_deref(), Some("c1"));
    assert_eq!(record.data, "d");
}

#[tokio::test]
async fn test_edit_with_empty_category_removes_it() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    let id = repo.save(&save("", "Box", ""), None, false).await.unwrap().id();
    let mut edit = EditPrefab {
        id: id.to_string(),
        name: "Box".into(),
        category: "c1".into(),
        ..Default::default()
    };
    repo.edit(&edit).await.unwrap();

    edit.category = String::new();
    repo.edit(&edit).await.unwrap();

    assert_eq!(repo.get(&id.to_string()).await.unwrap().category_id, "");
    let doc = store
        .find_one(PrefabRecord::COLLECTION, &Filter::id(&id))
        .await
        .unwrap()
        .unwrap();
    assert!(!doc.contains_key(fields::CATEGORY));
}

#[tokio::test]
async fn test_edit_unknown_id_is_a_silent_no_op() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());

    let result = repo
        .edit(&EditPrefab {
            id: ObjectId::new().to_string(),
            name: "Ghost".into(),
            ..Default::default()
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(store.len(PrefabRecord::COLLECTION).await, 0);
}

#[tokio::test]
async fn test_edit_validation() {
    let repo = PrefabRepository::new(MemoryStore::new());
    let id = ObjectId::new().to_string();

    let empty_name = repo
        .edit(&EditPrefab {
            id,
            name: "  ".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    let bad_id = repo
        .edit(&EditPrefab {
            id: "x".into(),
            name: "Name".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(empty_name.to_string(), "Name is not allowed to be empty.");
    assert_eq!(bad_id.to_string(), "ID is not allowed.");
}

#[tokio::test]
async fn test_delete_unknown_is_not_found_and_mutates_nothing() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    repo.save(&save("", "Keep", ""), None, false).await.unwrap();

    let err = repo.delete(&ObjectId::new().to_string()).await.unwrap_err();

    assert!(matches!(err, PrefabError::NotFound(_)));
    assert_eq!(store.len(PrefabRecord::COLLECTION).await, 1);
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    let a = repo.save(&save("", "A", ""), None, false).await.unwrap().id();
    let b = repo.save(&save("", "B", ""), None, false).await.unwrap().id();

    repo.delete(&a.to_string()).await.unwrap();

    assert_eq!(store.len(PrefabRecord::COLLECTION).await, 1);
    assert!(repo.get(&b.to_string()).await.is_ok());
    assert!(matches!(
        repo.get(&a.to_string()).await,
        Err(PrefabError::NotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_newest_first_with_category_names() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    create_category(&store, "c1", "Furniture", PREFAB_CATEGORY_TYPE).await;
    create_category(&store, "c2", "Lights", "Material").await;

    let first = repo.save(&save("", "First", ""), None, false).await.unwrap().id();
    let second = repo.save(&save("", "Second", ""), None, false).await.unwrap().id();
    let third = repo.save(&save("", "Third", ""), None, false).await.unwrap().id();
    for (id, category) in [(first, "c1"), (second, "c2"), (third, "missing")] {
        repo.edit(&EditPrefab {
            id: id.to_string(),
            name: "Renamed".into(),
            category: category.into(),
            ..Default::default()
        })
        .await
        .unwrap();
    }

    let list = repo.list(None, false).await.unwrap();

    let ids: Vec<String> = list.iter().map(|s| s.id.clone()).collect();
    assert_eq!(
        ids,
        vec![third.to_string(), second.to_string(), first.to_string()]
    );
    assert_eq!(list[2].category_name, "Furniture");
    assert_eq!(list[2].category_id, "c1");
    // Only categories of the prefab type resolve.
    assert_eq!(list[1].category_name, "");
    assert_eq!(list[0].category_name, "");
    assert_eq!(list[0].category_id, "");
}

#[tokio::test]
async fn test_list_with_authority_filters_by_owner() {
    let store = MemoryStore::new();
    let repo = PrefabRepository::new(store.clone());
    let x = create_account(&store, "x", "Regular", "pw").await;
    let admin = create_account(&store, "admin", ADMINISTRATOR, "pw").await;
    let x = caller(&x, false);
    let admin = caller(&admin, true);

    let x_owned = repo.save(&save("", "X", ""), Some(&x), true).await.unwrap().id();
    let admin_owned = repo
        .save(&save("", "Admin", ""), Some(&admin), true)
        .await
        .unwrap()
        .id();
    let shared = repo.save(&save("", "Shared", ""), None, false).await.unwrap().id();

    let ids = |list: Vec<PrefabSummary>| list.into_iter().map(|s| s.id).collect::<Vec<_>>();

    assert_eq!(
        ids(repo.list(Some(&x), true).await.unwrap()),
        vec![x_owned.to_string()]
    );
    assert_eq!(
        ids(repo.list(Some(&admin), true).await.unwrap()),
        vec![shared.to_string(), admin_owned.to_string()]
    );
    assert!(repo.list(None, true).await.unwrap().is_empty());
    assert_eq!(repo.list(None, false).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_surfaces_malformed_records() {
    let store = MemoryStore::new();
    let mut doc = Document::new();
    doc.insert("Name".into(), serde_json::json!(17));
    store.insert_one(PrefabRecord::COLLECTION, doc).await.unwrap();

    let err = PrefabRepository::new(store).list(None, false).await.unwrap_err();

    assert!(matches!(err, PrefabError::Store(StoreError::MalformedRecord(_))));
}

// ---------------------------------------------------------------------------
// Credentials and sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_verify_correct_password() {
    let store = MemoryStore::new();
    let alice = create_account(&store, "alice", "Alice", ALICE_PASSWORD).await;

    let account = CredentialVerifier::new(store)
        .verify("alice", ALICE_PASSWORD)
        .await
        .unwrap();

    assert_eq!(account, alice);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let store = MemoryStore::new();
    create_account(&store, "alice", "Alice", ALICE_PASSWORD).await;
    let verifier = CredentialVerifier::new(store);

    let wrong = verifier.verify("alice", "wrongpass").await.unwrap_err();
    let unknown = verifier.verify("nosuchuser", "anything").await.unwrap_err();

    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[tokio::test]
async fn test_malformed_account_looks_like_unknown_user() {
    let store = MemoryStore::new();
    let mut doc = Document::new();
    doc.insert("_id".into(), serde_json::json!(ObjectId::new().to_string()));
    doc.insert("Username".into(), serde_json::json!("bob"));
    doc.insert("Password".into(), serde_json::json!("digest"));
    store.insert_one(Account::COLLECTION, doc).await.unwrap();
    let verifier = CredentialVerifier::new(store);

    let malformed = verifier.verify("bob", "pw").await.unwrap_err();
    let unknown = verifier.verify("nosuchuser", "pw").await.unwrap_err();

    assert!(matches!(malformed, AuthError::InvalidCredentials));
    assert_eq!(malformed.to_string(), unknown.to_string());
}

#[tokio::test]
async fn test_verify_requires_both_fields() {
    let verifier = CredentialVerifier::new(MemoryStore::new());

    let no_user = verifier.verify(" ", "pw").await.unwrap_err();
    let no_password = verifier.verify("alice", "").await.unwrap_err();

    assert_eq!(no_user.to_string(), "Username is not allowed to be empty.");
    assert_eq!(no_password.to_string(), "Password is not allowed to be empty.");
}

#[tokio::test]
async fn test_session_resolves_back_to_caller() {
    let store = MemoryStore::new();
    let alice = create_account(&store, "alice", "Alice", ALICE_PASSWORD).await;
    let admin = create_account(&store, "admin", ADMINISTRATOR, "pw").await;
    let resolver = SessionResolver::new(store, ADMINISTRATOR);

    let resolved = resolver.resolve(&alice.id.to_string()).await.unwrap().unwrap();
    assert_eq!(resolved.id, alice.id);
    assert!(!resolved.is_administrator);

    let resolved = resolver.resolve(&admin.id.to_string()).await.unwrap().unwrap();
    assert!(resolved.is_administrator);

    assert_eq!(resolver.resolve("garbage").await.unwrap(), None);
    assert_eq!(
        resolver.resolve(&ObjectId::new().to_string()).await.unwrap(),
        None
    );
}
