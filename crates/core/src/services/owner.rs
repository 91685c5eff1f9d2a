//! Owners resource: `owners`, plus last-name search.

use super::RestResource;
use crate::config::ClientConfig;
use crate::constants::OWNERS_PATH;
use crate::error_handler::{HttpErrorHandler, ServiceResult};
use crate::transport::HttpTransport;
use petclinic_types::Owner;
use std::sync::Arc;

#[derive(Clone)]
pub struct OwnerService {
    resource: RestResource,
}

impl OwnerService {
    pub const SERVICE_NAME: &'static str = "OwnerService";

    pub fn new(
        transport: Arc<dyn HttpTransport>,
        cfg: &ClientConfig,
        errors: &HttpErrorHandler,
    ) -> Self {
        Self {
            resource: RestResource::new(transport, cfg, errors, Self::SERVICE_NAME),
        }
    }

    pub async fn get_owners(&self) -> ServiceResult<Vec<Owner>> {
        let on_error = self.resource.handler("getOwners", Vec::<Owner>::new());
        self.resource
            .get(self.resource.url(&[OWNERS_PATH]), &on_error)
            .await
    }

    pub async fn get_owner_by_id(&self, owner_id: i32) -> ServiceResult<Owner> {
        let on_error = self.resource.handler("getOwnerById", Owner::default());
        let url = self.resource.url(&[OWNERS_PATH, owner_id.to_string().as_str()]);
        self.resource.get(url, &on_error).await
    }

    pub async fn add_owner(&self, owner: &Owner) -> ServiceResult<Owner> {
        let on_error = self.resource.handler("addOwner", owner.clone());
        self.resource
            .post(self.resource.url(&[OWNERS_PATH]), owner, &on_error)
            .await
    }

    pub async fn update_owner(&self, owner_id: i32, owner: &Owner) -> ServiceResult<()> {
        let on_error = self.resource.handler("updateOwner", owner.clone());
        let url = self.resource.url(&[OWNERS_PATH, owner_id.to_string().as_str()]);
        self.resource.put(url, owner, &on_error).await
    }

    pub async fn delete_owner(&self, owner_id: i32) -> ServiceResult<()> {
        let on_error = self.resource.handler("deleteOwner", vec![owner_id]);
        let url = self.resource.url(&[OWNERS_PATH, owner_id.to_string().as_str()]);
        self.resource.delete(url, &on_error).await
    }

    /// Lists owners whose last name starts with `last_name`; `None` lists everyone.
    pub async fn search_owners(&self, last_name: Option<&str>) -> ServiceResult<Vec<Owner>> {
        let on_error = self.resource.handler("searchOwners", Vec::<Owner>::new());
        let mut url = self.resource.url(&[OWNERS_PATH]);
        if let Some(last_name) = last_name {
            url.query_pairs_mut().append_pair("lastName", last_name);
        }
        self.resource.get(url, &on_error).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{fixture, url, Fixture};
    use crate::transport::TransportFailure;
    use http::{HeaderMap, Method, StatusCode};

    fn service(f: &Fixture) -> OwnerService {
        OwnerService::new(f.transport.clone(), &f.cfg, &f.errors)
    }

    fn george() -> Owner {
        Owner {
            id: Some(1),
            first_name: "George".into(),
            last_name: "Franklin".into(),
            address: "110 W. Liberty St.".into(),
            city: "Madison".into(),
            telephone: "6085551023".into(),
            pets: vec![],
        }
    }

    #[tokio::test]
    async fn test_get_owners_decodes_list() {
        let f = fixture();
        f.transport.respond(
            StatusCode::OK,
            r#"[{"id":1,"firstName":"A"},{"id":2,"firstName":"B"}]"#,
        );

        let owners = service(&f).get_owners().await.expect("list should succeed");

        assert_eq!(owners.len(), 2);
        assert_eq!(owners[1].first_name, "B");
        let request = f.transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, url("owners"));
    }

    #[tokio::test]
    async fn test_add_owner_posts_body() {
        let f = fixture();
        let mut owner = george();
        owner.id = None;
        f.transport.respond(
            StatusCode::CREATED,
            &serde_json::to_string(&george()).unwrap(),
        );

        let created = service(&f).add_owner(&owner).await.expect("add should succeed");

        assert_eq!(created.id, Some(1));
        let request = f.transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, url("owners"));
        assert_eq!(request.body, Some(serde_json::to_value(&owner).unwrap()));
    }

    #[tokio::test]
    async fn test_update_and_delete_use_id_paths() {
        let f = fixture();
        f.transport.respond(StatusCode::NO_CONTENT, "");
        f.transport.respond(StatusCode::NO_CONTENT, "");
        let service = service(&f);

        service.update_owner(1, &george()).await.expect("update should succeed");
        service.delete_owner(1).await.expect("delete should succeed");

        let requests = f.transport.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].url, url("owners/1"));
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].url, url("owners/1"));
        assert_eq!(requests[1].body, None);
    }

    #[tokio::test]
    async fn test_search_owners_encodes_last_name() {
        let f = fixture();
        f.transport.respond(StatusCode::OK, "[]");
        f.transport.respond(StatusCode::OK, "[]");
        let service = service(&f);

        service.search_owners(Some("Van Dyke")).await.expect("search should succeed");
        service.search_owners(None).await.expect("search should succeed");

        let requests = f.transport.requests();
        assert_eq!(requests[0].url, url("owners?lastName=Van+Dyke"));
        assert_eq!(requests[1].url, url("owners"));
    }

    #[tokio::test]
    async fn test_get_owner_by_id_failure_is_normalized_and_logged() {
        let f = fixture();
        f.transport.fail(TransportFailure::server(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            "404 error",
        ));

        let err = service(&f)
            .get_owner_by_id(1)
            .await
            .expect_err("404 should fail");

        assert_eq!(err.message(), "server returned code 404 with body \"404 error\"");
        assert_eq!(
            f.log.lines()[1],
            "OwnerService::getOwnerById failed: server returned code 404 with body \"404 error\""
        );
    }
}
