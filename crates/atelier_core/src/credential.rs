use crate::constants::fields;
use crate::document::{Document, Filter};
use crate::error::AuthError;
use crate::model::{Account, Record};
use crate::traits::DocumentStore;

use md5::{Digest, Md5};
use tracing::{error, warn};

/// Lowercase hex MD5 of `secret` followed by `salt`.
///
/// Single-round salted MD5 is kept for compatibility with existing accounts.
pub fn derive_digest(secret: &str, salt: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks a username and password against the account collection.
#[derive(Clone)]
pub struct CredentialVerifier<S> {
    store: S,
}

impl<S: DocumentStore> CredentialVerifier<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the account on success.
    ///
    /// An unknown username and a wrong password both fail with
    /// [`AuthError::InvalidCredentials`]. The second lookup is constrained by both
    /// the username and the derived digest, so the two paths are shaped alike.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() {
            return Err(AuthError::Validation(
                "Username is not allowed to be empty.".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AuthError::Validation(
                "Password is not allowed to be empty.".to_string(),
            ));
        }

        let by_username = Filter::eq(fields::USERNAME, username);
        let Some(doc) = self.store.find_one(Account::COLLECTION, &by_username).await? else {
            warn!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };
        let account = readable_account(doc)?;

        let digest = derive_digest(password, &account.salt);
        let by_credentials = Filter::and([by_username, Filter::eq(fields::PASSWORD, digest)]);
        let Some(doc) = self
            .store
            .find_one(Account::COLLECTION, &by_credentials)
            .await?
        else {
            warn!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        readable_account(doc)
    }
}

// A malformed account answers like an unknown one.
fn readable_account(doc: Document) -> Result<Account, AuthError> {
    Account::from_document(doc).map_err(|e| {
        error!("unreadable account: {e}");
        AuthError::InvalidCredentials
    })
}
