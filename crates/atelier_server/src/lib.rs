//! # Atelier Server
//!
//! An Axum-based prefab server.
//!
//! Provides the [`AtelierServer`] builder, which ties a [`DocumentStore`](atelier_core::traits::DocumentStore)
//! to the prefab and login endpoints.
//!
//! ## Responses
//!
//! Every endpoint answers HTTP 200 with a `{"Code", "Msg", "Data"}` body.
//! `Code` is `200` on success and `300` for any failure the client can correct.
//!
//! ## Ownership
//!
//! With [`AtelierServerConfig::authority_enabled`], prefabs saved by a signed in
//! account belong to it and are only listed for it. The administrator additionally
//! sees prefabs without an owner.
//!
//! ## Example
//!
//! ```no_run
//! use atelier_server::prelude::*;
//! use atelier_memory::MemoryStore;
//!
//! # async fn run() {
//! let store = MemoryStore::new();
//!
//! let app = AtelierServer::default().build(store);
//! # }
//! ```

mod api;
mod server;

pub mod auth;
pub mod config;
pub mod envelope;
pub mod state;

pub use server::AtelierServer;

pub mod prelude {
    pub use crate::AtelierServer;
    pub use crate::auth::*;
    pub use crate::config::*;
    pub use crate::envelope::*;
    pub use crate::state::*;
}
