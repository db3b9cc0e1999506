//! The `{Code, Msg, Data}` body every endpoint answers with.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const SUCCESS: u16 = 200;
/// Client-correctable failure: validation, not found, bad credentials, store errors.
pub const FAILURE: u16 = 300;

#[derive(Debug, Serialize)]
pub struct Envelope<T = ()> {
    #[serde(rename = "Code")]
    pub code: u16,
    #[serde(rename = "Msg")]
    pub msg: String,
    #[serde(rename = "Data", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: SUCCESS,
            msg: msg.into(),
            data: Some(data),
        }
    }
}

impl Envelope {
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            code: SUCCESS,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            code: FAILURE,
            msg: msg.into(),
            data: None,
        }
    }
}

// Failures are still HTTP 200; clients branch on `Code`.
impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
