//! Specialties resource: `specialties`.

use super::RestResource;
use crate::config::ClientConfig;
use crate::constants::SPECIALTIES_PATH;
use crate::error_handler::{HttpErrorHandler, ServiceResult};
use crate::transport::HttpTransport;
use petclinic_types::Specialty;
use std::sync::Arc;

#[derive(Clone)]
pub struct SpecialtyService {
    resource: RestResource,
}

impl SpecialtyService {
    pub const SERVICE_NAME: &'static str = "SpecialtyService";

    pub fn new(
        transport: Arc<dyn HttpTransport>,
        cfg: &ClientConfig,
        errors: &HttpErrorHandler,
    ) -> Self {
        Self {
            resource: RestResource::new(transport, cfg, errors, Self::SERVICE_NAME),
        }
    }

    pub async fn get_specialties(&self) -> ServiceResult<Vec<Specialty>> {
        let on_error = self
            .resource
            .handler("getSpecialties", Vec::<Specialty>::new());
        self.resource
            .get(self.resource.url(&[SPECIALTIES_PATH]), &on_error)
            .await
    }

    pub async fn get_specialty_by_id(&self, specialty_id: i32) -> ServiceResult<Specialty> {
        let on_error = self
            .resource
            .handler("getSpecialtyById", Specialty::default());
        let url = self
            .resource
            .url(&[SPECIALTIES_PATH, specialty_id.to_string().as_str()]);
        self.resource.get(url, &on_error).await
    }

    pub async fn add_specialty(&self, specialty: &Specialty) -> ServiceResult<Specialty> {
        let on_error = self.resource.handler("addSpecialty", specialty.clone());
        self.resource
            .post(self.resource.url(&[SPECIALTIES_PATH]), specialty, &on_error)
            .await
    }

    pub async fn update_specialty(
        &self,
        specialty_id: i32,
        specialty: &Specialty,
    ) -> ServiceResult<()> {
        let on_error = self.resource.handler("updateSpecialty", specialty.clone());
        let url = self
            .resource
            .url(&[SPECIALTIES_PATH, specialty_id.to_string().as_str()]);
        self.resource.put(url, specialty, &on_error).await
    }

    pub async fn delete_specialty(&self, specialty_id: i32) -> ServiceResult<()> {
        let on_error = self.resource.handler("deleteSpecialty", 0_i32);
        let url = self
            .resource
            .url(&[SPECIALTIES_PATH, specialty_id.to_string().as_str()]);
        self.resource.delete(url, &on_error).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{fixture, url};
    use http::{Method, StatusCode};

    #[tokio::test]
    async fn test_specialty_crud_paths() {
        let f = fixture();
        f.transport
            .respond(StatusCode::OK, r#"[{"id":1,"name":"radiology"}]"#);
        f.transport.respond(StatusCode::NO_CONTENT, "");
        f.transport.respond(StatusCode::NO_CONTENT, "");
        let service = SpecialtyService::new(f.transport.clone(), &f.cfg, &f.errors);
        let radiology = Specialty {
            id: Some(1),
            name: "radiology".into(),
        };

        let all = service.get_specialties().await.expect("list should succeed");
        service
            .update_specialty(1, &radiology)
            .await
            .expect("update should succeed");
        service.delete_specialty(1).await.expect("delete should succeed");

        assert_eq!(all, vec![radiology]);
        let requests = f.transport.requests();
        assert_eq!(requests[0].url, url("specialties"));
        assert_eq!(requests[1].method, Method::PUT);
        assert_eq!(requests[1].url, url("specialties/1"));
        assert_eq!(requests[2].method, Method::DELETE);
        assert_eq!(requests[2].url, url("specialties/1"));
    }

    #[tokio::test]
    async fn test_specialty_service_name_in_log() {
        let f = fixture();
        let service = SpecialtyService::new(f.transport.clone(), &f.cfg, &f.errors);

        let _ = service.get_specialty_by_id(9).await;

        assert!(f.log.lines()[1].starts_with("SpecialtyService::getSpecialtyById failed: "));
    }
}
