//! The opaque document layer shared by all [`DocumentStore`](crate::traits::DocumentStore)
//! implementations.
//!
//! Documents are JSON objects. Filters and updates cover exactly what the
//! repository issues: equality, field existence, `AND`/`OR`, and `$set`/`$unset`.

use crate::constants::fields;
use crate::id::ObjectId;

use serde_json::{Map, Value};
use std::cmp::Ordering;

pub type Document = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// The field is present and equal to the value.
    Eq(String, Value),
    /// The field is present (`true`) or absent (`false`). A `null` value counts as present.
    Exists(String, bool),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    pub fn id(id: &ObjectId) -> Self {
        Self::eq(fields::ID, id.to_string())
    }

    pub fn exists(field: impl Into<String>, exists: bool) -> Self {
        Self::Exists(field.into(), exists)
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::And(filters.into_iter().collect())
    }

    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::Or(filters.into_iter().collect())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => doc.get(field) == Some(value),
            Filter::Exists(field, exists) => doc.contains_key(field) == *exists,
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

/// A field-level partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub set: Document,
    pub unset: Vec<String>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.insert(field.into(), value.into());
        self
    }

    pub fn unset(mut self, field: impl Into<String>) -> Self {
        self.unset.push(field.into());
        self
    }

    pub fn apply(&self, doc: &mut Document) {
        for (field, value) in &self.set {
            doc.insert(field.clone(), value.clone());
        }
        for field in &self.unset {
            doc.remove(field);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: Option<Sort>,
}

impl FindOptions {
    pub fn sorted_by(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            sort: Some(Sort {
                field: field.into(),
                order,
            }),
        }
    }

    /// Sorts `docs` in place. Stable, so equal keys keep insertion order.
    pub fn apply(&self, docs: &mut [Document]) {
        let Some(Sort { field, order }) = &self.sort else {
            return;
        };
        docs.sort_by(|a, b| {
            let ordering = compare_values(a.get(field), b.get(field));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
}

/// Assigns a fresh `_id` when the document has none and returns the document's id value.
pub fn ensure_id(doc: &mut Document) -> Value {
    doc.entry(fields::ID)
        .or_insert_with(|| Value::String(ObjectId::new().to_string()))
        .clone()
}

// Missing sorts first, then null, booleans, numbers, strings; anything else by its JSON text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(_) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) if rank(a) == 5 && rank(b) == 5 => x.to_string().cmp(&y.to_string()),
        _ => rank(a).cmp(&rank(b)),
    }
}
