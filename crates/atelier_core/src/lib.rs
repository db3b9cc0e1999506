//! # Atelier Core
//!
//! Types, traits and domain logic of the atelier prefab server.
//!
//! - **[`DocumentStore`](traits::DocumentStore)**: Trait for plugging in a document store (memory, filesystem, ...).
//! - **[`PrefabRepository`](repository::PrefabRepository)**: Ownership-filtered prefab lifecycle with upsert-by-id saves.
//! - **[`CredentialVerifier`](credential::CredentialVerifier)**: Salted digest login check.
//! - **[`Session`](session::Session)**: One-day session cookies bound to an account id.

pub mod constants;
pub mod credential;
pub mod document;
pub mod error;
pub mod id;
pub mod model;
pub mod repository;
pub mod search;
pub mod session;
pub mod traits;
pub mod visibility;

pub mod prelude {
    pub use super::constants::*;
    pub use super::credential::*;
    pub use super::document::*;
    pub use super::error::*;
    pub use super::id::*;
    pub use super::model::*;
    pub use super::repository::*;
    pub use super::search::*;
    pub use super::session::*;
    pub use super::traits::*;
    pub use super::visibility::*;
}
