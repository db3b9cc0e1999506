//! Typed records and the mapping layer between them and stored [`Document`]s.

use crate::constants::collections;
use crate::document::Document;
use crate::error::StoreError;
use crate::id::ObjectId;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed view of a stored document.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    /// Converts a stored document. Shape mismatches surface as [`StoreError::MalformedRecord`].
    fn from_document(doc: Document) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| StoreError::MalformedRecord(format!("{}: {e}", Self::COLLECTION)))
    }

    fn to_document(&self) -> Result<Document, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(doc) => Ok(doc),
            other => Err(StoreError::MalformedRecord(format!(
                "{}: expected an object, got {other}",
                Self::COLLECTION
            ))),
        }
    }
}

/// A stored prefab. A missing `owner_id` marks the record as shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(rename = "TotalPinYin", default)]
    pub total_pinyin: String,
    #[serde(rename = "FirstPinYin", default)]
    pub first_pinyin: String,
    #[serde(rename = "CreateTime")]
    pub create_time: DateTime<Utc>,
    #[serde(rename = "UpdateTime")]
    pub update_time: DateTime<Utc>,
    #[serde(rename = "Data", default)]
    pub data: String,
    #[serde(rename = "Thumbnail", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "UserID", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<ObjectId>,
}

impl Record for PrefabRecord {
    const COLLECTION: &'static str = collections::PREFAB;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Salt")]
    pub salt: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl Record for Account {
    const COLLECTION: &'static str = collections::USER;
}

/// Categories are owned elsewhere; prefabs only resolve names through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
}

impl Record for Category {
    const COLLECTION: &'static str = collections::CATEGORY;
}

/// List entry. Omits the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrefabSummary {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    #[serde(rename = "CategoryID")]
    pub category_id: String,
    pub category_name: String,
    #[serde(rename = "TotalPinYin")]
    pub total_pinyin: String,
    #[serde(rename = "FirstPinYin")]
    pub first_pinyin: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub thumbnail: String,
}

impl PrefabSummary {
    /// `category` is the resolved category, if any.
    pub fn new(record: PrefabRecord, category: Option<&Category>) -> Self {
        let (category_id, category_name) = category
            .map(|c| (c.id.clone(), c.name.clone()))
            .unwrap_or_default();

        Self {
            id: record.id.to_string(),
            name: record.name,
            category_id,
            category_name,
            total_pinyin: record.total_pinyin,
            first_pinyin: record.first_pinyin,
            create_time: record.create_time,
            update_time: record.update_time,
            thumbnail: record.thumbnail.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrefabDetail {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    #[serde(rename = "CategoryID")]
    pub category_id: String,
    #[serde(rename = "TotalPinYin")]
    pub total_pinyin: String,
    #[serde(rename = "FirstPinYin")]
    pub first_pinyin: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub data: String,
    pub thumbnail: String,
}

impl From<PrefabRecord> for PrefabDetail {
    fn from(record: PrefabRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            category_id: record.category_id.unwrap_or_default(),
            total_pinyin: record.total_pinyin,
            first_pinyin: record.first_pinyin,
            create_time: record.create_time,
            update_time: record.update_time,
            data: record.data,
            thumbnail: record.thumbnail.unwrap_or_default(),
        }
    }
}

/// The only account fields ever returned to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountInfo {
    pub username: String,
    pub name: String,
}

impl From<&Account> for AccountInfo {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            name: account.name.clone(),
        }
    }
}

/// Form fields of a save request. `id` may be empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SavePrefab {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub data: String,
}

/// Form fields of an edit request. An empty `category` removes the association.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EditPrefab {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub category: String,
}
