use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::config::DEFAULT_BASE_PATH;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user
    ),
    components(schemas(dto::UserDto, dto::UserReq, dto::ErrorDto)),
    tags((name = "users", description = "User records"))
)]
pub struct UsersApiDoc;

/// OpenAPI document for the routes as mounted under `base_path`.
pub fn document(base_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = UsersApiDoc::openapi();
    if base_path != DEFAULT_BASE_PATH {
        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| (path.replacen(DEFAULT_BASE_PATH, base_path, 1), item))
            .collect();
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_all_routes() {
        let doc = document(DEFAULT_BASE_PATH);
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert_eq!(paths, ["/api/users", "/api/users/{id}"]);

        let v = serde_json::to_value(&doc).unwrap();
        assert!(v.pointer("/paths/~1api~1users/post").is_some());
        assert!(v.pointer("/paths/~1api~1users~1{id}/delete").is_some());
        assert!(v.pointer("/components/schemas/UserDto").is_some());
    }

    #[test]
    fn follows_custom_base_path() {
        let doc = document("/v2/people");
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert_eq!(paths, ["/v2/people", "/v2/people/{id}"]);
    }
}
