// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token middleware for the `/api/*` routes.
//!
//! Auth is optional: with no token configured every request passes, with a
//! token configured a request must carry `Authorization: Bearer <token>`.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::handlers::ErrorResponse;

/// Authentication configuration for the gateway.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Expected bearer token. If `Some`, bearer auth is enabled.
    pub bearer_token: Option<String>,
}

impl AuthConfig {
    /// Whether a request carrying `header` (the raw `Authorization` value) may pass.
    pub fn permits(&self, header: Option<&str>) -> bool {
        let Some(expected) = self.bearer_token.as_deref() else {
            return true;
        };
        header
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == expected)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Middleware that validates the bearer token when one is configured.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    if auth.permits(header) {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "rejecting request with missing or wrong bearer token");
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Unauthorized".to_string(),
        }),
    )
        .into_response()
}
