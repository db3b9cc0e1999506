use crate::config::AtelierServerConfig;

use atelier_core::prelude::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState<S: DocumentStore> {
    pub store: S,
    pub config: Arc<AtelierServerConfig>,
}

impl<S: DocumentStore> AppState<S> {
    pub fn new(store: S, config: AtelierServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn prefabs(&self) -> PrefabRepository<S> {
        PrefabRepository::new(self.store.clone())
    }

    pub fn credentials(&self) -> CredentialVerifier<S> {
        CredentialVerifier::new(self.store.clone())
    }

    pub fn sessions(&self) -> SessionResolver<S> {
        SessionResolver::new(self.store.clone(), self.config.administrator_name.clone())
    }
}
