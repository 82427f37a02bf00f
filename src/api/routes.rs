//! `/v0` API route configuration.
//!
//! Protected routes require Bearer token authentication via
//! [`crate::api::middleware::auth`]; the composition happens in
//! [`crate::routes::app_router`].

use crate::api::handlers::{
    create_redirect_handler, current_user_handler, delete_redirect_handler, delete_user_handler,
    get_redirect_handler, list_redirects_handler, register_user_handler, token_handler,
    update_redirect_handler, update_user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public `/v0` routes.
///
/// # Endpoints
///
/// - `POST /user`            - Register an account
/// - `POST /security/token`  - Exchange credentials for a bearer token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(register_user_handler))
        .route("/security/token", post(token_handler))
}

/// Bearer-protected `/v0` routes.
///
/// # Endpoints
///
/// - `GET    /user`                   - The authenticated account
/// - `PATCH  /user`                   - Change username and/or password
/// - `DELETE /user`                   - Remove the account
/// - `POST   /redirect`               - Register a redirect
/// - `GET    /redirect`               - List redirects (paginated)
/// - `GET    /redirect/{short_link}`  - Fetch a redirect
/// - `PATCH  /redirect/{short_link}`  - Partially update a redirect
/// - `DELETE /redirect/{short_link}`  - Remove a redirect
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user",
            get(current_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        .route(
            "/redirect",
            get(list_redirects_handler).post(create_redirect_handler),
        )
        .route(
            "/redirect/{short_link}",
            get(get_redirect_handler)
                .patch(update_redirect_handler)
                .delete(delete_redirect_handler),
        )
}
