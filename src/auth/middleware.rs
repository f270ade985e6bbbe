use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Attach the acting user to the request. This deployment serves a single
/// configured user, so every request resolves to the same id.
pub async fn resolve_user(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let auth_user = AuthUser {
        id: state.config.default_user_id,
    };

    req.extensions_mut().insert(auth_user);
    next.run(req).await
}
