use crate::api::rest::handlers;
use crate::domain::service::Service;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;

/// Mount the users collection at `base_path` and its items at `{base_path}/{id}`.
pub fn register_routes(
    router: Router,
    base_path: &str,
    service: Arc<Service>,
) -> anyhow::Result<Router> {
    let item_path = format!("{base_path}/{{id}}");

    let users = Router::new()
        // GET /users - List all users, POST /users - Create a new user
        .route(
            base_path,
            get(handlers::list_users).post(handlers::create_user),
        )
        // GET|PUT|DELETE /users/{id}
        .route(
            &item_path,
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(Extension(service));

    Ok(router.merge(users))
}
