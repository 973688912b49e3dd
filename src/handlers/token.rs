use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::AppState;

// Demo-only credentials. Real deployments must replace this check with an
// external credential store before exposing the endpoint.
const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "demo";

/// Transient login payload; never persisted
#[derive(Debug, Deserialize)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /auth/token - validate credentials and mint a one-hour bearer token
pub async fn issue(
    State(state): State<AppState>,
    Json(login): Json<UserLogin>,
) -> Result<Json<TokenResponse>, ApiError> {
    if login.username != DEMO_USERNAME || login.password != DEMO_PASSWORD {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let claims = Claims::new(&login.username, state.config.security.jwt_expiry_secs);
    let token = auth::generate_jwt(&claims, &state.config.security.jwt_secret).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(TokenResponse { token }))
}
