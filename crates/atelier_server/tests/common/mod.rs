#![allow(dead_code)]

use atelier_core::prelude::*;
use atelier_memory::MemoryStore;
use atelier_server::prelude::*;
use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const ALICE_PASSWORD: &str = "correctpass";

/// Insert an account whose stored password is the salted digest of `password`.
pub async fn create_account(
    store: &MemoryStore,
    username: &str,
    name: &str,
    password: &str,
) -> Account {
    let salt = format!("{username}-salt");
    let account = Account {
        id: ObjectId::new(),
        username: username.to_string(),
        name: name.to_string(),
        password: derive_digest(password, &salt),
        salt,
    };
    store
        .insert_one(Account::COLLECTION, account.to_document().unwrap())
        .await
        .expect("account insert should succeed");
    account
}

pub async fn create_category(store: &MemoryStore, id: &str, name: &str, kind: &str) {
    let category = Category {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
    };
    store
        .insert_one(Category::COLLECTION, category.to_document().unwrap())
        .await
        .expect("category insert should succeed");
}

pub fn caller(account: &Account, is_administrator: bool) -> Caller {
    Caller {
        id: account.id,
        username: account.username.clone(),
        name: account.name.clone(),
        is_administrator,
    }
}

pub fn build_test_app<S: DocumentStore>(store: S, authority_enabled: bool) -> Router {
    AtelierServer::new(AtelierServerConfig {
        authority_enabled,
        ..Default::default()
    })
    .build(store)
}

pub async fn get(app: Router, uri: &str, session: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(session) = session {
        builder = builder.header(COOKIE, format!("UserID={session}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// POST an urlencoded form. `fields` values are encoded as given, so keep them URL safe.
pub async fn post_form(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    session: Option<&str>,
) -> Response<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(session) = session {
        builder = builder.header(COOKIE, format!("UserID={session}"));
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
