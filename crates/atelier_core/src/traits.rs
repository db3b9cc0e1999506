use crate::document::{Document, Filter, FindOptions, Update};
use crate::error::*;

/// A trait for injecting a document store into the repository and the server.
///
/// Implementations must be cheap to clone and safe to share between requests.
/// Timeouts and retries are the implementation's concern.
pub trait DocumentStore: Send + Sync + 'static + Clone {
    /// Returns the first document of `collection` matching `filter`.
    fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Returns every matching document, ordered by `options`.
    fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>> + Send;

    /// Inserts a document, assigning an `_id` when it has none.
    fn insert_one(
        &self,
        collection: &str,
        doc: Document,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Applies `update` to the first matching document. Returns the number of matched documents.
    fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Deletes the first matching document. Returns the number of deleted documents.
    fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
