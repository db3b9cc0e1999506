//! # Memory Server
//!
//! Showcases ownership enforcement with an in-memory store seeded with two accounts:
//! `admin` (the administrator) and `guest`. Both use the password `password`.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --example memory_server --features "server memory"
//! ```

use atelier::prelude::*;
use std::env;

async fn seed_account(store: &MemoryStore, username: &str, name: &str) -> anyhow::Result<()> {
    let salt = format!("{username}:{}", ObjectId::new());
    let account = Account {
        id: ObjectId::new(),
        username: username.to_string(),
        name: name.to_string(),
        password: derive_digest("password", &salt),
        salt,
    };
    store
        .insert_one(Account::COLLECTION, account.to_document()?)
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let store = MemoryStore::new();
    seed_account(&store, "admin", ADMINISTRATOR).await?;
    seed_account(&store, "guest", "Guest").await?;

    // Build
    let app = AtelierServer::new(AtelierServerConfig {
        authority_enabled: true,
        ..Default::default()
    })
    .build(store);

    // Serve
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    println!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
