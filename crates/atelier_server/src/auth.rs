use crate::api::ApiError;
use crate::state::AppState;

use atelier_core::prelude::*;
use axum::{extract::FromRequestParts, http::header::COOKIE, http::request::Parts};

/// The caller behind the session cookie, if any.
///
/// Never rejects for a missing or unknown session; only store failures reject.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<Caller>);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
    S: DocumentStore,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = state.config.session_cookie.as_str();
        let session = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .find_map(|header| cookie_value(header, cookie_name))
            .map(str::to_owned);

        let Some(session) = session else {
            return Ok(CurrentUser(None));
        };

        state
            .sessions()
            .resolve(&session)
            .await
            .map(CurrentUser)
            .map_err(ApiError::from)
    }
}
