use thiserror::Error;

/// A record id could not be parsed.
#[derive(Error, Debug)]
pub enum IdError {
    #[error("Invalid id: {0}")]
    Hex(#[from] hex::FromHexError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// Low-level I/O error of a file backed store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document does not have the shape of the record it should map to.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A document with the same `_id` already exists in the collection.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// The backing store could not serve the request. Carries the store's own text.
    #[error("{0}")]
    Unavailable(String),
}

/// Failures of the prefab repository.
///
/// All variants are client-correctable and map to envelope **code 300**.
#[derive(Error, Debug)]
pub enum PrefabError {
    /// A required field was empty or an id was malformed.
    #[error("{0}")]
    Validation(String),

    /// No record matched the given id.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of credential verification and session resolution.
///
/// Maps to envelope **code 300**.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username or password missing.
    #[error("{0}")]
    Validation(String),

    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("The username or password is wrong.")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PrefabError {
    pub fn invalid_id() -> Self {
        Self::Validation("ID is not allowed.".to_string())
    }

    pub fn empty_name() -> Self {
        Self::Validation("Name is not allowed to be empty.".to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound("The prefab does not exist.".to_string())
    }
}
