use crate::{
    auth::CurrentUser,
    dtos::{
        notice::Notice,
        profile::{ProfileResponse, UpdateProfileRequest},
    },
    error::ApiError,
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::accounts::AccountService;

/// The signed-in user's profile
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Profile"
)]
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<ProfileResponse> {
    Json(user.into())
}

/// Update the signed-in user's name or email
#[utoipa::path(
    put,
    path = "/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Blank name or malformed email", body = Notice),
        (status = 401, description = "Unauthorized - invalid or missing JWT", body = Notice)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = AccountService::update_profile(&state.db, user.id, request.into()).await?;

    Ok(Json(user.into()))
}
