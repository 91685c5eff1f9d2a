//! Pet types resource: `pettypes`.

use super::RestResource;
use crate::config::ClientConfig;
use crate::constants::PET_TYPES_PATH;
use crate::error_handler::{HttpErrorHandler, ServiceResult};
use crate::transport::HttpTransport;
use petclinic_types::PetType;
use std::sync::Arc;

#[derive(Clone)]
pub struct PetTypeService {
    resource: RestResource,
}

impl PetTypeService {
    pub const SERVICE_NAME: &'static str = "PetTypeService";

    pub fn new(
        transport: Arc<dyn HttpTransport>,
        cfg: &ClientConfig,
        errors: &HttpErrorHandler,
    ) -> Self {
        Self {
            resource: RestResource::new(transport, cfg, errors, Self::SERVICE_NAME),
        }
    }

    pub async fn get_pet_types(&self) -> ServiceResult<Vec<PetType>> {
        let on_error = self.resource.handler("getPetTypes", Vec::<PetType>::new());
        self.resource
            .get(self.resource.url(&[PET_TYPES_PATH]), &on_error)
            .await
    }

    pub async fn get_pet_type_by_id(&self, type_id: i32) -> ServiceResult<PetType> {
        let on_error = self.resource.handler("getPetTypeById", PetType::default());
        let url = self
            .resource
            .url(&[PET_TYPES_PATH, type_id.to_string().as_str()]);
        self.resource.get(url, &on_error).await
    }

    pub async fn add_pet_type(&self, pet_type: &PetType) -> ServiceResult<PetType> {
        let on_error = self.resource.handler("addPetType", pet_type.clone());
        self.resource
            .post(self.resource.url(&[PET_TYPES_PATH]), pet_type, &on_error)
            .await
    }

    pub async fn update_pet_type(&self, type_id: i32, pet_type: &PetType) -> ServiceResult<()> {
        let on_error = self.resource.handler("updatePetType", pet_type.clone());
        let url = self
            .resource
            .url(&[PET_TYPES_PATH, type_id.to_string().as_str()]);
        self.resource.put(url, pet_type, &on_error).await
    }

    pub async fn delete_pet_type(&self, type_id: i32) -> ServiceResult<()> {
        let on_error = self.resource.handler("deletePetType", 0_i32);
        let url = self
            .resource
            .url(&[PET_TYPES_PATH, type_id.to_string().as_str()]);
        self.resource.delete(url, &on_error).await
    }
}
