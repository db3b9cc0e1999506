//! # Atelier
//!
//! A small prefab asset server: list, fetch, save, edit and delete serialized
//! editor prefabs in a document store, with optional ownership enforcement,
//! pinyin search keys and cookie based login.
//!
//! This crate serves as an entry point, re-exporting the core logic and
//! optionally including the server and store implementations via feature flags.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | **`server`** | Includes the Axum-based server implementation (`atelier_server`). |
//! | **`fs`** | Document store on the local filesystem (`atelier_fs`). |
//! | **`memory`** | In-memory document store for tests and demos (`atelier_memory`). |
//!
//! ## Example: Custom Server
//!
//! ```toml
//! [dependencies]
//! atelier = { version = "0.3", features = ["server", "fs"] }
//! ```
//!
//! ```rust,ignore
//! use atelier::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = FileSystemStore::new("./atelier_data");
//!
//!     // Build
//!     let app = AtelierServer::default().build(store);
//!
//!     // Serve
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub use atelier_core::*;

#[cfg(feature = "server")]
pub mod server {
    pub use atelier_server::*;
}

#[cfg(feature = "fs")]
pub mod fs {
    pub use atelier_fs::*;
}

#[cfg(feature = "memory")]
pub mod memory {
    pub use atelier_memory::*;
}

pub mod prelude {
    pub use atelier_core::prelude::*;

    #[cfg(feature = "server")]
    pub use atelier_server::prelude::*;

    #[cfg(feature = "fs")]
    pub use atelier_fs::FileSystemStore;

    #[cfg(feature = "memory")]
    pub use atelier_memory::MemoryStore;
}
