//! Session issuance and caller resolution.
//!
//! A session is the account's `_id` carried as an opaque bearer value in an
//! HTTP-only cookie valid for one day.

use crate::document::Filter;
use crate::error::StoreError;
use crate::id::ObjectId;
use crate::model::{Account, Record};
use crate::traits::DocumentStore;

use chrono::{DateTime, TimeDelta, Utc};

const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// How long an issued session stays valid.
pub fn session_validity() -> TimeDelta {
    TimeDelta::days(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account_id: ObjectId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(account: &Account, now: DateTime<Utc>) -> Self {
        Self {
            account_id: account.id,
            expires_at: now + session_validity(),
        }
    }

    /// `Set-Cookie` value for this session. No `SameSite` attribute, so the browser default applies.
    pub fn cookie(&self, name: &str) -> String {
        format!(
            "{name}={}; Path=/; Expires={}; HttpOnly",
            self.account_id,
            self.expires_at.format(COOKIE_DATE_FORMAT)
        )
    }

    /// `Set-Cookie` value that removes the session cookie.
    pub fn expired_cookie(name: &str) -> String {
        format!("{name}=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; HttpOnly")
    }
}

/// Extracts the value of cookie `name` from a `Cookie` request header.
///
/// One pair of surrounding double quotes is removed.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            let value = value.trim();
            value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value)
        })
}

/// The account behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: ObjectId,
    pub username: String,
    pub name: String,
    pub is_administrator: bool,
}

/// Maps session values back to accounts.
#[derive(Clone)]
pub struct SessionResolver<S> {
    store: S,
    administrator_name: String,
}

impl<S: DocumentStore> SessionResolver<S> {
    pub fn new(store: S, administrator_name: impl Into<String>) -> Self {
        Self {
            store,
            administrator_name: administrator_name.into(),
        }
    }

    /// A malformed value or an unknown account resolves to `None`; only store failures are errors.
    pub async fn resolve(&self, session: &str) -> Result<Option<Caller>, StoreError> {
        let Ok(id) = ObjectId::parse_str(session.trim()) else {
            return Ok(None);
        };
        let Some(doc) = self
            .store
            .find_one(Account::COLLECTION, &Filter::id(&id))
            .await?
        else {
            return Ok(None);
        };
        let account = Account::from_document(doc)?;

        Ok(Some(Caller {
            id: account.id,
            is_administrator: account.name == self.administrator_name,
            username: account.username,
            name: account.name,
        }))
    }
}
