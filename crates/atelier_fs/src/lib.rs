//! # Atelier FileSystem Store
//!
//! A local filesystem backend for atelier.
//!
//! This crate implements the [`DocumentStore`] trait, keeping each collection
//! as a JSON array in `<root>/<collection>.json`.
//!
//! ## Features
//!
//! * **Atomic Writes**: Uses temporary files and rename operations so a collection file is never read half written.
//! * **Serialized Mutations**: Read-modify-write cycles are serialized per store handle.
//!
//! ## Usage
//!
//! ```no_run
//! use atelier_fs::FileSystemStore;
//!
//! let store = FileSystemStore::new("./atelier_data");
//! ```

use atelier_core::prelude::*;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

async fn atomic_write(path: &Path, data: Bytes) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tmp_path = path.with_extension("tmp");

    fs::write(&tmp_path, data).await?;
    fs::rename(&tmp_path, path).await?;

    Ok(())
}

#[derive(Clone)]
pub struct FileSystemStore {
    root: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileSystemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            root: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn get_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    async fn load(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let path = self.get_path(collection);
        match fs::read(&path).await {
            Ok(data) => serde_json::from_slice(&data).map_err(|e| {
                StoreError::MalformedRecord(format!("{}: {e}", path.to_string_lossy()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Unavailable(format!(
                "{}: {e}",
                path.to_string_lossy()
            ))),
        }
    }

    async fn persist(&self, collection: &str, docs: &[Document]) -> Result<(), StoreError> {
        let data = Bytes::from(serde_json::to_vec_pretty(docs)?);
        atomic_write(&self.get_path(collection), data).await?;
        debug!(collection, count = docs.len(), "persisted collection");
        Ok(())
    }
}

impl DocumentStore for FileSystemStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let _guard = self.lock.lock().await;
        let docs = self.load(collection).await?;
        Ok(docs.into_iter().find(|doc| filter.matches(doc)))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let mut found: Vec<Document> = {
            let _guard = self.lock.lock().await;
            self.load(collection)
                .await?
                .into_iter()
                .filter(|doc| filter.matches(doc))
                .collect()
        };
        options.apply(&mut found);
        Ok(found)
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<(), StoreError> {
        let id = ensure_id(&mut doc);
        let _guard = self.lock.lock().await;
        let mut docs = self.load(collection).await?;
        if docs.iter().any(|d| d.get(fields::ID) == Some(&id)) {
            return Err(StoreError::DuplicateKey(id.to_string()));
        }
        docs.push(doc);
        self.persist(collection, &docs).await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<u64, StoreError> {
        let _guard = self.lock.lock().await;
        let mut docs = self.load(collection).await?;
        let Some(doc) = docs.iter_mut().find(|doc| filter.matches(doc)) else {
            return Ok(0);
        };
        update.apply(doc);
        self.persist(collection, &docs).await?;
        Ok(1)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let _guard = self.lock.lock().await;
        let mut docs = self.load(collection).await?;
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(0);
        };
        docs.remove(index);
        self.persist(collection, &docs).await?;
        Ok(1)
    }
}
