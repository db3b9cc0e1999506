use crate::constants::{PREFAB_CATEGORY_TYPE, fields};
use crate::document::{Filter, FindOptions, SortOrder, Update};
use crate::error::{PrefabError, StoreError};
use crate::id::ObjectId;
use crate::model::*;
use crate::search::derive_search_keys;
use crate::session::Caller;
use crate::traits::DocumentStore;
use crate::visibility::Visibility;

use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Outcome of [`PrefabRepository::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(ObjectId),
    Updated(ObjectId),
}

impl SaveOutcome {
    pub fn id(&self) -> ObjectId {
        match self {
            Self::Created(id) | Self::Updated(id) => *id,
        }
    }
}

/// List, fetch, save, edit and delete prefabs in a [`DocumentStore`].
#[derive(Clone)]
pub struct PrefabRepository<S> {
    store: S,
}

impl<S: DocumentStore> PrefabRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Newest first. With `authority_enabled`, only what [`Visibility`] grants the caller.
    pub async fn list(
        &self,
        caller: Option<&Caller>,
        authority_enabled: bool,
    ) -> Result<Vec<PrefabSummary>, PrefabError> {
        let visibility = Visibility::resolve(caller, authority_enabled);
        let Some(filter) = visibility.filter() else {
            debug!("no caller, listing nothing");
            return Ok(Vec::new());
        };

        let category_filter = Filter::eq(fields::TYPE, PREFAB_CATEGORY_TYPE);
        let unsorted = FindOptions::default();
        let newest_first = FindOptions::sorted_by(fields::ID, SortOrder::Descending);
        let (category_docs, docs) = futures::try_join!(
            self.store
                .find_many(Category::COLLECTION, &category_filter, &unsorted),
            self.store
                .find_many(PrefabRecord::COLLECTION, &filter, &newest_first),
        )?;

        let categories: HashMap<String, Category> = category_docs
            .into_iter()
            .filter_map(|doc| match Category::from_document(doc) {
                Ok(category) => Some((category.id.clone(), category)),
                Err(e) => {
                    warn!("skipping category: {e}");
                    None
                }
            })
            .collect();

        let mut list = Vec::with_capacity(docs.len());
        for doc in docs {
            let record = PrefabRecord::from_document(doc)?;
            if !visibility.permits(&record) {
                continue;
            }
            let category = record
                .category_id
                .as_deref()
                .and_then(|id| categories.get(id));
            list.push(PrefabSummary::new(record, category));
        }

        debug!(count = list.len(), "listed prefabs");
        Ok(list)
    }

    pub async fn get(&self, id: &str) -> Result<PrefabDetail, PrefabError> {
        let id = parse_id(id)?;
        let doc = self
            .store
            .find_one(PrefabRecord::COLLECTION, &Filter::id(&id))
            .await?
            .ok_or_else(PrefabError::not_found)?;

        Ok(PrefabRecord::from_document(doc)?.into())
    }

    /// Creates a record unless `request.id` names an existing one, in which case
    /// only `Data` and `UpdateTime` change. The name of an existing record is kept.
    pub async fn save(
        &self,
        request: &SavePrefab,
        caller: Option<&Caller>,
        authority_enabled: bool,
    ) -> Result<SaveOutcome, PrefabError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(PrefabError::empty_name());
        }
        let data = request.data.trim();
        let now = Utc::now();

        if let Ok(id) = ObjectId::parse_str(request.id.trim()) {
            let filter = Filter::id(&id);
            if self
                .store
                .find_one(PrefabRecord::COLLECTION, &filter)
                .await?
                .is_some()
            {
                let update_time = serde_json::to_value(now).map_err(StoreError::from)?;
                let update = Update::new()
                    .set(fields::UPDATE_TIME, update_time)
                    .set(fields::DATA, data);
                self.store
                    .update_one(PrefabRecord::COLLECTION, &filter, &update)
                    .await?;
                debug!(%id, "updated prefab data");
                return Ok(SaveOutcome::Updated(id));
            }
        }

        let keys = derive_search_keys(name);
        let owner_id = if authority_enabled {
            caller.map(|c| c.id)
        } else {
            None
        };
        let record = PrefabRecord {
            id: ObjectId::new(),
            name: name.to_string(),
            category_id: None,
            total_pinyin: keys.total,
            first_pinyin: keys.first,
            create_time: now,
            update_time: now,
            data: data.to_string(),
            thumbnail: None,
            owner_id,
        };
        self.store
            .insert_one(PrefabRecord::COLLECTION, record.to_document()?)
            .await?;

        info!(id = %record.id, name, "created prefab");
        Ok(SaveOutcome::Created(record.id))
    }

    /// Renames and re-categorizes a prefab. Matching nothing is not an error.
    pub async fn edit(&self, request: &EditPrefab) -> Result<(), PrefabError> {
        let id = parse_id(&request.id)?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(PrefabError::empty_name());
        }

        let keys = derive_search_keys(name);
        let mut update = Update::new()
            .set(fields::NAME, name)
            .set(fields::TOTAL_PINYIN, keys.total)
            .set(fields::FIRST_PINYIN, keys.first)
            .set(fields::THUMBNAIL, request.thumbnail.trim());
        let category = request.category.trim();
        update = if category.is_empty() {
            update.unset(fields::CATEGORY)
        } else {
            update.set(fields::CATEGORY, category)
        };

        let matched = self
            .store
            .update_one(PrefabRecord::COLLECTION, &Filter::id(&id), &update)
            .await?;
        if matched == 0 {
            debug!(%id, "edit matched no prefab");
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), PrefabError> {
        let id = parse_id(id)?;
        let filter = Filter::id(&id);
        if self
            .store
            .find_one(PrefabRecord::COLLECTION, &filter)
            .await?
            .is_none()
        {
            return Err(PrefabError::not_found());
        }

        self.store
            .delete_one(PrefabRecord::COLLECTION, &filter)
            .await?;
        info!(%id, "deleted prefab");
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<ObjectId, PrefabError> {
    ObjectId::parse_str(id.trim()).map_err(|_| PrefabError::invalid_id())
}
