//! Vets resource: `vets`.

use super::RestResource;
use crate::config::ClientConfig;
use crate::constants::VETS_PATH;
use crate::error_handler::{HttpErrorHandler, ServiceResult};
use crate::transport::HttpTransport;
use petclinic_types::Vet;
use std::sync::Arc;

#[derive(Clone)]
pub struct VetService {
    resource: RestResource,
}

impl VetService {
    pub const SERVICE_NAME: &'static str = "VetService";

    pub fn new(
        transport: Arc<dyn HttpTransport>,
        cfg: &ClientConfig,
        errors: &HttpErrorHandler,
    ) -> Self {
        Self {
            resource: RestResource::new(transport, cfg, errors, Self::SERVICE_NAME),
        }
    }

    pub async fn get_vets(&self) -> ServiceResult<Vec<Vet>> {
        let on_error = self.resource.handler("getVets", Vec::<Vet>::new());
        self.resource
            .get(self.resource.url(&[VETS_PATH]), &on_error)
            .await
    }

    pub async fn get_vet_by_id(&self, vet_id: i32) -> ServiceResult<Vet> {
        let on_error = self.resource.handler("getVetById", Vet::default());
        let url = self.resource.url(&[VETS_PATH, vet_id.to_string().as_str()]);
        self.resource.get(url, &on_error).await
    }

    pub async fn add_vet(&self, vet: &Vet) -> ServiceResult<Vet> {
        let on_error = self.resource.handler("addVet", vet.clone());
        self.resource
            .post(self.resource.url(&[VETS_PATH]), vet, &on_error)
            .await
    }

    pub async fn update_vet(&self, vet_id: i32, vet: &Vet) -> ServiceResult<()> {
        let on_error = self.resource.handler("updateVet", vet.clone());
        let url = self.resource.url(&[VETS_PATH, vet_id.to_string().as_str()]);
        self.resource.put(url, vet, &on_error).await
    }

    pub async fn delete_vet(&self, vet_id: i32) -> ServiceResult<()> {
        let on_error = self.resource.handler("deleteVet", 0_i32);
        let url = self.resource.url(&[VETS_PATH, vet_id.to_string().as_str()]);
        self.resource.delete(url, &on_error).await
    }
}
