use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use http_body_util::BodyExt;
use tracing::info;

use super::{
    models::{
        CreateProgrammerRequest, ProgrammerCollection, ProgrammerRepresentation,
        UpdateProgrammerRequest,
    },
    state::{AppState, Principal},
    validation::validate_programmer,
};
use crate::api::error::ApiError;
use crate::store::Programmer;

/// Create endpoint (POST /api/programmers)
///
/// The allow-list for client input is `nickname`, `avatarNumber` and
/// `tagLine`; `nickname` is only writable here, never on update. The owning
/// user comes from the request principal and the starting power level is
/// assigned server-side. Returns 201 with a `Location` header pointing at the
/// show endpoint.
pub async fn create_programmer(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    let body_bytes = read_body(body, &state).await?;
    let request: CreateProgrammerRequest = super::utils::parse_json_body(&body_bytes)?;

    let mut programmer = Programmer::new(
        request.nickname.unwrap_or_default(),
        principal.user_id,
    );
    if let Some(avatar_number) = request.avatar_number {
        programmer.avatar_number = avatar_number;
    }
    programmer.tag_line = request.tag_line;

    let mut errors = validate_programmer(&programmer);
    // nickname is the storage key; a duplicate create must not clobber the
    // existing programmer
    if !errors.contains_key("nickname")
        && state
            .store
            .find_one_by_nickname(&programmer.nickname)?
            .is_some()
    {
        errors.insert(
            "nickname".to_string(),
            "This nickname is already taken".to_string(),
        );
    }
    if !errors.is_empty() {
        state.metrics.validation_failed();
        return Err(ApiError::Validation(errors));
    }

    state.store.save_programmer(&mut programmer)?;
    state.metrics.programmer_created();
    info!(nickname = %programmer.nickname, owner = %principal.username, "Created programmer");

    let location = programmer_url(&programmer.nickname);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProgrammerRepresentation::from(&programmer)),
    ))
}

/// Show endpoint (GET /api/programmers/{nickname})
pub async fn show_programmer(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let programmer = state
        .store
        .find_one_by_nickname(&nickname)?
        .ok_or_else(|| not_found(&nickname))?;

    Ok((
        StatusCode::OK,
        Json(ProgrammerRepresentation::from(&programmer)),
    ))
}

/// List endpoint (GET /api/programmers)
///
/// Returns every programmer, wrapped in a `programmers` collection field.
pub async fn list_programmers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let programmers = state
        .store
        .find_all()?
        .iter()
        .map(ProgrammerRepresentation::from)
        .collect();

    Ok((StatusCode::OK, Json(ProgrammerCollection { programmers })))
}

/// Update endpoint (PUT/PATCH /api/programmers/{nickname})
///
/// Only `avatarNumber` and `tagLine` are writable; a field absent from the
/// body is left unchanged. PUT and PATCH deliberately share these
/// partial-update semantics: an omitted field is never cleared, so a PUT is
/// not a full replacement. The merged entity is revalidated before saving.
pub async fn update_programmer(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    Extension(principal): Extension<Principal>,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    let mut programmer = state
        .store
        .find_one_by_nickname(&nickname)?
        .ok_or_else(|| not_found(&nickname))?;

    let body_bytes = read_body(body, &state).await?;
    let request: UpdateProgrammerRequest = super::utils::parse_json_body(&body_bytes)?;

    if let Some(avatar_number) = request.avatar_number {
        programmer.avatar_number = avatar_number;
    }
    if let Some(tag_line) = request.tag_line {
        programmer.tag_line = Some(tag_line);
    }
    programmer.user_id = principal.user_id;

    let errors = validate_programmer(&programmer);
    if !errors.is_empty() {
        state.metrics.validation_failed();
        return Err(ApiError::Validation(errors));
    }

    state.store.save_programmer(&mut programmer)?;
    state.metrics.programmer_updated();
    info!(nickname = %programmer.nickname, "Updated programmer");

    Ok((
        StatusCode::OK,
        Json(ProgrammerRepresentation::from(&programmer)),
    ))
}

/// Delete endpoint (DELETE /api/programmers/{nickname})
///
/// Idempotent: returns 204 whether or not the programmer existed.
pub async fn delete_programmer(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if state.store.delete_programmer(&nickname)? {
        state.metrics.programmer_deleted();
        info!(nickname = %nickname, "Deleted programmer");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// URL of the show endpoint, used for the `Location` header on create
pub fn programmer_url(nickname: &str) -> String {
    format!("/api/programmers/{}", nickname)
}

fn not_found(nickname: &str) -> ApiError {
    ApiError::NotFound(format!(
        "Oh no! The programmer '{}' has deserted! We'll send a search party!",
        nickname
    ))
}

/// Reads the request body, enforcing the configured size limit
async fn read_body(
    body: axum::body::Body,
    state: &AppState,
) -> Result<Vec<u8>, ApiError> {
    let data = body
        .collect()
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .to_bytes()
        .to_vec();

    super::utils::validate_body_size(&data, state.config.server.api.max_payload_bytes)?;

    Ok(data)
}
