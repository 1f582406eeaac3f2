//! Staff Authentication Routes

mod handler;

use axum::{Router, middleware, routing::post, routing::put};

use crate::auth::require_staff;
use crate::core::ServerState;

/// Build authentication router
/// - /api/auth/login: public
/// - /api/auth/username: staff only
pub fn router() -> Router<ServerState> {
    let public_routes = Router::new().route("/api/auth/login", post(handler::login));

    let staff_routes = Router::new()
        .route("/api/auth/username", put(handler::change_username))
        .layer(middleware::from_fn(require_staff));

    public_routes.merge(staff_routes)
}
