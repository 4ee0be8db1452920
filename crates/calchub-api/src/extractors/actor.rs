//! `Actor` extractor — pulls the caller identity from request headers.
//!
//! Authentication and authorization happen upstream; whatever put the
//! `x-actor` header on the request has already vouched for it, and the
//! value is trusted as-is. Mutating routes require it so the audit
//! trail always has a subject.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use calchub_service::context::ActorContext;

use crate::error::ApiError;
use crate::state::AppState;
use calchub_core::error::AppError;

/// Extracted actor context available in handlers.
#[derive(Debug, Clone)]
pub struct Actor(pub ActorContext);

impl std::ops::Deref for Actor {
    type Target = ActorContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get("x-actor")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing x-actor header")))?;

        let role = parts
            .headers
            .get("x-actor-role")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown");

        Ok(Actor(ActorContext::new(actor, role)))
    }
}
