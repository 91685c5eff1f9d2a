//! Pets resource: `pets`, with creation nested under the owning owner.

use super::RestResource;
use crate::config::ClientConfig;
use crate::constants::{OWNERS_PATH, PETS_PATH};
use crate::error_handler::{HttpErrorHandler, ServiceResult};
use crate::transport::HttpTransport;
use petclinic_types::Pet;
use std::sync::Arc;

#[derive(Clone)]
pub struct PetService {
    resource: RestResource,
}

impl PetService {
    pub const SERVICE_NAME: &'static str = "PetService";

    pub fn new(
        transport: Arc<dyn HttpTransport>,
        cfg: &ClientConfig,
        errors: &HttpErrorHandler,
    ) -> Self {
        Self {
            resource: RestResource::new(transport, cfg, errors, Self::SERVICE_NAME),
        }
    }

    pub async fn get_pets(&self) -> ServiceResult<Vec<Pet>> {
        let on_error = self.resource.handler("getPets", Vec::<Pet>::new());
        self.resource
            .get(self.resource.url(&[PETS_PATH]), &on_error)
            .await
    }

    pub async fn get_pet_by_id(&self, pet_id: i32) -> ServiceResult<Pet> {
        let on_error = self.resource.handler("getPetById", Pet::default());
        let url = self.resource.url(&[PETS_PATH, pet_id.to_string().as_str()]);
        self.resource.get(url, &on_error).await
    }

    /// Adds `pet` to the owner identified by `owner_id`.
    pub async fn add_pet(&self, owner_id: i32, pet: &Pet) -> ServiceResult<Pet> {
        let on_error = self.resource.handler("addPet", pet.clone());
        let url = self
            .resource
            .url(&[OWNERS_PATH, owner_id.to_string().as_str(), PETS_PATH]);
        self.resource.post(url, pet, &on_error).await
    }

    pub async fn update_pet(&self, pet_id: i32, pet: &Pet) -> ServiceResult<()> {
        let on_error = self.resource.handler("updatePet", pet.clone());
        let url = self.resource.url(&[PETS_PATH, pet_id.to_string().as_str()]);
        self.resource.put(url, pet, &on_error).await
    }

    pub async fn delete_pet(&self, pet_id: i32) -> ServiceResult<()> {
        let on_error = self.resource.handler("deletePet", 0_i32);
        let url = self.resource.url(&[PETS_PATH, pet_id.to_string().as_str()]);
        self.resource.delete(url, &on_error).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{fixture, url};
    use crate::transport::TransportFailure;
    use http::{HeaderMap, HeaderValue, Method, StatusCode};

    #[tokio::test]
    async fn test_add_pet_posts_under_owner() {
        let f = fixture();
        f.transport
            .respond(StatusCode::CREATED, r#"{"id":14,"ownerId":6,"name":"Rosy"}"#);
        let service = PetService::new(f.transport.clone(), &f.cfg, &f.errors);
        let pet = Pet {
            name: "Rosy".into(),
            ..Pet::default()
        };

        let created = service.add_pet(6, &pet).await.expect("add should succeed");

        assert_eq!(created.id, Some(14));
        let request = f.transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, url("owners/6/pets"));
    }

    #[tokio::test]
    async fn test_validation_failure_reports_first_binding_error() {
        let f = fixture();
        let mut headers = HeaderMap::new();
        headers.insert(
            "errors",
            HeaderValue::from_static(
                r#"[{"objectName":"pet","fieldName":"name","fieldValue":"","errorMessage":"must not be blank"}]"#,
            ),
        );
        f.transport
            .fail(TransportFailure::server(StatusCode::BAD_REQUEST, headers, ""));
        let service = PetService::new(f.transport.clone(), &f.cfg, &f.errors);

        let err = service
            .update_pet(7, &Pet::default())
            .await
            .expect_err("400 should fail");

        assert_eq!(err.message(), "must not be blank");
        assert_eq!(
            f.log.lines()[1],
            "PetService::updatePet failed: must not be blank"
        );
    }

    #[tokio::test]
    async fn test_get_pets_and_delete_paths() {
        let f = fixture();
        f.transport.respond(StatusCode::OK, "[]");
        f.transport.respond(StatusCode::NO_CONTENT, "");
        let service = PetService::new(f.transport.clone(), &f.cfg, &f.errors);

        assert!(service.get_pets().await.expect("list should succeed").is_empty());
        service.delete_pet(3).await.expect("delete should succeed");

        let requests = f.transport.requests();
        assert_eq!(requests[0].url, url("pets"));
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].url, url("pets/3"));
    }
}
