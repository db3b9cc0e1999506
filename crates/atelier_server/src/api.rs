use crate::prelude::*;

use atelier_core::prelude::*;
use axum::{
    Form,
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};

pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn store_failure(err: &StoreError, source: &anyhow::Error) -> Envelope {
    error!("Store Error: {:?}", source);
    Envelope::failure(err.to_string())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<PrefabError>() {
            return match err {
                PrefabError::Store(store) => store_failure(store, &self.0),
                _ => Envelope::failure(err.to_string()),
            }
            .into_response();
        }

        if let Some(err) = self.0.downcast_ref::<AuthError>() {
            return match err {
                AuthError::Store(store) => store_failure(store, &self.0),
                _ => Envelope::failure(err.to_string()),
            }
            .into_response();
        }

        if let Some(err) = self.0.downcast_ref::<StoreError>() {
            return store_failure(err, &self.0).into_response();
        }

        error!("Internal Server Error: {:?}", self.0);
        Envelope::failure("Internal Server Error").into_response()
    }
}

#[derive(Deserialize)]
pub struct IdParams {
    #[serde(rename = "ID", default)]
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginParams {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// GET /api/Prefab/List
pub async fn list_prefabs<S: DocumentStore>(
    State(state): State<AppState<S>>,
    CurrentUser(caller): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let list = state
        .prefabs()
        .list(caller.as_ref(), state.config.authority_enabled)
        .await?;

    Ok(Envelope::ok("Get Successfully!", list))
}

/// GET /api/Prefab/Get?ID=
pub async fn get_prefab<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<IdParams>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state.prefabs().get(&params.id).await?;
    Ok(Envelope::ok("Get Successfully!", detail))
}

/// POST /api/Prefab/Edit
pub async fn edit_prefab<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Form(request): Form<EditPrefab>,
) -> Result<impl IntoResponse, ApiError> {
    state.prefabs().edit(&request).await?;
    Ok(Envelope::message("Saved successfully!"))
}

/// POST /api/Prefab/Save
/// Creates a prefab, or replaces the payload of an existing one.
pub async fn save_prefab<S: DocumentStore>(
    State(state): State<AppState<S>>,
    CurrentUser(caller): CurrentUser,
    Form(request): Form<SavePrefab>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .prefabs()
        .save(&request, caller.as_ref(), state.config.authority_enabled)
        .await?;

    Ok(Envelope::message("Saved successfully!"))
}

/// POST /api/Prefab/Delete
pub async fn delete_prefab<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Form(params): Form<IdParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.prefabs().delete(&params.id).await?;
    Ok(Envelope::message("Delete successfully!"))
}

/// POST /api/Login/Login
/// Verifies the credentials and sets the session cookie.
pub async fn login<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Form(params): Form<LoginParams>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .credentials()
        .verify(&params.username, &params.password)
        .await?;

    let session = Session::issue(&account, Utc::now());
    let cookie = session.cookie(&state.config.session_cookie);
    info!(username = %account.username, "login succeeded");

    Ok((
        [(SET_COOKIE, cookie)],
        Envelope::ok("Login successfully!", AccountInfo::from(&account)),
    ))
}

/// POST /api/Login/Logout
pub async fn logout<S: DocumentStore>(State(state): State<AppState<S>>) -> impl IntoResponse {
    (
        [(SET_COOKIE, Session::expired_cookie(&state.config.session_cookie))],
        Envelope::message("Logout successfully!"),
    )
}
