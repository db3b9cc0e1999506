//! # Simple Server
//!
//! Showcases a prefab server backed by [`FileSystemStore`].
//!
//! ## Configuration
//!
//! - `DATA_DIR`: Where collections are stored. Defaults to `./atelier_data`.
//! - `AUTHORITY_ENABLED`: Set to `true` to enforce prefab ownership.
//! - `ADMINISTRATOR_NAME`, `SESSION_COOKIE`: See [`AtelierServerConfig`].
//!
//! ## Usage
//!
//! ```sh
//! cargo run --example simple_server --features "server fs"
//! ```

use atelier::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Config
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./atelier_data".to_string());
    let config = AtelierServerConfig::from_env();

    // Store
    let store = FileSystemStore::new(data_dir);

    // Build
    let app = AtelierServer::new(config).build(store);

    // Serve
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    println!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
