//! # API REST
//!
//! In-memory stand-in for the petclinic REST backend.
//!
//! Serves the same resource paths under `/petclinic/api/` and rejects invalid bodies the way the
//! real backend does: status 400 with a JSON array of [`BindingError`](petclinic_types::BindingError)
//! in the `errors` response header. The client crate's integration tests and the `petclinic-run`
//! binary use it.

#![warn(rust_2018_idioms)]

pub mod entity;
pub mod error;
pub mod handlers;
pub mod store;

pub use error::{ApiError, ApiResult, ERRORS_HEADER};
pub use store::ClinicStore;

use axum::routing::{get, post};
use axum::Router;
use entity::Entity;
use handlers::AppState;
use petclinic_types::{Owner, Pet, PetType, Specialty, Vet, Visit};
use std::sync::Arc;

/// Path prefix of every route.
pub const API_PREFIX: &str = "/petclinic/api";

/// GET/PUT/DELETE on `/{collection}/:id`.
fn item_routes<E: Entity>() -> axum::routing::MethodRouter<AppState> {
    get(handlers::get_one::<E>)
        .put(handlers::update::<E>)
        .delete(handlers::remove::<E>)
}

/// GET and POST on `/{collection}` plus the item routes.
fn crud<E: Entity>(router: Router<AppState>, collection: &str) -> Router<AppState> {
    router
        .route(
            &format!("/{collection}"),
            get(handlers::list::<E>).post(handlers::create::<E>),
        )
        .route(&format!("/{collection}/:id"), item_routes::<E>())
}

/// Build the stub backend router over `store`.
pub fn router(store: Arc<ClinicStore>) -> Router {
    let api = Router::new()
        .route(
            "/owners",
            get(handlers::list_owners).post(handlers::create::<Owner>),
        )
        .route("/owners/:id", item_routes::<Owner>())
        .route("/owners/:id/pets", post(handlers::create_owner_pet))
        .route(
            "/owners/:id/pets/:pet_id/visits",
            post(handlers::create_pet_visit),
        )
        .route("/pets", get(handlers::list::<Pet>))
        .route("/pets/:id", item_routes::<Pet>())
        .route("/visits", get(handlers::list::<Visit>))
        .route("/visits/:id", item_routes::<Visit>());

    let api = crud::<PetType>(api, "pettypes");
    let api = crud::<Specialty>(api, "specialties");
    let api = crud::<Vet>(api, "vets");

    Router::new().nest(API_PREFIX, api).with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use petclinic_types::BindingError;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(
        app: Router,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let builder = Request::builder()
            .method(method)
            .uri(format!("{API_PREFIX}{path}"));
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn seeded() -> Router {
        router(Arc::new(ClinicStore::seeded()))
    }

    #[tokio::test]
    async fn test_list_owners_includes_pets() {
        let response = call(seeded(), Method::GET, "/owners", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let owners = json_body(response).await;
        assert_eq!(owners[0]["firstName"], "George");
        assert_eq!(owners[0]["pets"][0]["name"], "Leo");
        assert_eq!(owners[0]["pets"][0]["type"]["name"], "cat");
    }

    #[tokio::test]
    async fn test_search_owners_by_last_name_prefix() {
        let response = call(seeded(), Method::GET, "/owners?lastName=dav", None).await;
        let owners = json_body(response).await;
        let names: Vec<&str> = owners
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["firstName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Betty", "Harold"]);
    }

    #[tokio::test]
    async fn test_search_without_matches_is_404_with_empty_body() {
        let response = call(seeded(), Method::GET, "/owners?lastName=Nobody", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_empty_collections_are_404() {
        let app = router(Arc::new(ClinicStore::new()));
        for path in ["/owners", "/pets", "/pettypes", "/specialties", "/vets", "/visits"] {
            let response = call(app.clone(), Method::GET, path, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {path}");
        }
    }

    #[tokio::test]
    async fn test_missing_owner_is_404_with_text_body() {
        let response = call(seeded(), Method::GET, "/owners/999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"owner 999 not found");
    }

    #[tokio::test]
    async fn test_blank_owner_is_rejected_with_errors_header() {
        let body = json!({
            "firstName": "",
            "lastName": "Coleman",
            "address": "105 N. Lake St.",
            "city": "Monona",
            "telephone": "6085552654"
        });
        let response = call(seeded(), Method::POST, "/owners", Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let header = response.headers().get(ERRORS_HEADER).unwrap().to_str().unwrap();
        let errors: Vec<BindingError> = serde_json::from_str(header).unwrap();
        assert_eq!(errors[0].field_name, "firstName");
        assert_eq!(errors[0].error_message, "must not be blank");
    }

    #[tokio::test]
    async fn test_create_then_fetch_pet_type() {
        let app = seeded();
        let response = call(
            app.clone(),
            Method::POST,
            "/pettypes",
            Some(json!({"name": "ferret"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let id = created["id"].as_i64().unwrap();

        let response = call(app, Method::GET, &format!("/pettypes/{id}"), None).await;
        assert_eq!(json_body(response).await["name"], "ferret");
    }

    #[tokio::test]
    async fn test_update_rejects_conflicting_body_id() {
        let response = call(
            seeded(),
            Method::PUT,
            "/specialties/1",
            Some(json!({"id": 2, "name": "radiology"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().contains_key(ERRORS_HEADER));
    }

    #[tokio::test]
    async fn test_update_and_delete_return_no_content() {
        let app = seeded();
        let response = call(
            app.clone(),
            Method::PUT,
            "/vets/1",
            Some(json!({"firstName": "Jim", "lastName": "Carter"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = call(app.clone(), Method::DELETE, "/vets/1", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = call(app, Method::GET, "/vets/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_pet_to_owner() {
        let app = seeded();
        let body = json!({
            "name": "Samantha",
            "birthDate": "2012-09-04",
            "type": {"id": 1, "name": "cat"}
        });
        let response = call(app.clone(), Method::POST, "/owners/1/pets", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["ownerId"], 1);

        let owner = json_body(call(app, Method::GET, "/owners/1", None).await).await;
        assert_eq!(owner["pets"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_visit_requires_pet_of_owner() {
        let app = seeded();
        let body = json!({"description": "checkup"});
        let response = call(
            app.clone(),
            Method::POST,
            "/owners/1/pets/2/visits",
            Some(body.clone()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = call(app, Method::POST, "/owners/1/pets/1/visits", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let visit = json_body(response).await;
        assert_eq!(visit["petId"], 1);
        assert!(visit["date"].is_string());
    }
}
