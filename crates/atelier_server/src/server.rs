use crate::{api, prelude::*};
use atelier_core::prelude::{routes::*, *};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// The builder for the Atelier Server.
#[derive(Clone, Debug, Default)]
pub struct AtelierServer {
    config: AtelierServerConfig,
}

impl AtelierServer {
    pub fn new(config: AtelierServerConfig) -> Self {
        Self { config }
    }

    /// Builds the route table over `store`.
    pub fn build<S: DocumentStore>(self, store: S) -> Router {
        Router::new()
            .route(HEALTH, get(|| async { "OK" }))
            .route(PREFAB_LIST, get(api::list_prefabs::<S>))
            .route(PREFAB_GET, get(api::get_prefab::<S>))
            .route(PREFAB_EDIT, post(api::edit_prefab::<S>))
            .route(PREFAB_SAVE, post(api::save_prefab::<S>))
            .route(PREFAB_DELETE, post(api::delete_prefab::<S>))
            .route(LOGIN, post(api::login::<S>))
            .route(LOGOUT, post(api::logout::<S>))
            .layer(TraceLayer::new_for_http())
            .with_state(AppState::new(store, self.config))
    }
}
