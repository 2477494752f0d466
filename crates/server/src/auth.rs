use crate::{error::ApiError, state::AppState};
use axum::{extract::FromRequestParts, http::request::Parts};
use database::{entities::users, services::accounts::AccountService};
use log::debug;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// The active user behind the request's bearer token.
///
/// Requires the OAuth2 layer to have validated the token and stored its
/// claims; the `sub` claim is matched against `users.subject`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub users::Model);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let subject = parts
            .extensions
            .get::<DefaultClaims>()
            .and_then(|claims| claims.sub.clone())
            .ok_or(ApiError::Unauthorized)?;

        match AccountService::find_by_subject(&state.db, &subject).await? {
            Some(user) => Ok(Self(user)),
            None => {
                debug!("No active user for subject {subject}");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
