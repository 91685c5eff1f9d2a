//! Visits resource: `visits`, with creation nested under the owner's pet.

use super::RestResource;
use crate::config::ClientConfig;
use crate::constants::{OWNERS_PATH, PETS_PATH, VISITS_PATH};
use crate::error_handler::{HttpErrorHandler, ServiceResult};
use crate::transport::HttpTransport;
use petclinic_types::Visit;
use std::sync::Arc;

#[derive(Clone)]
pub struct VisitService {
    resource: RestResource,
}

impl VisitService {
    pub const SERVICE_NAME: &'static str = "VisitService";

    pub fn new(
        transport: Arc<dyn HttpTransport>,
        cfg: &ClientConfig,
        errors: &HttpErrorHandler,
    ) -> Self {
        Self {
            resource: RestResource::new(transport, cfg, errors, Self::SERVICE_NAME),
        }
    }

    pub async fn get_visits(&self) -> ServiceResult<Vec<Visit>> {
        let on_error = self.resource.handler("getVisits", Vec::<Visit>::new());
        self.resource
            .get(self.resource.url(&[VISITS_PATH]), &on_error)
            .await
    }

    pub async fn get_visit_by_id(&self, visit_id: i32) -> ServiceResult<Visit> {
        let on_error = self.resource.handler("getVisitById", Visit::default());
        let url = self
            .resource
            .url(&[VISITS_PATH, visit_id.to_string().as_str()]);
        self.resource.get(url, &on_error).await
    }

    /// Records `visit` for the pet `pet_id` of owner `owner_id`.
    pub async fn add_visit(&self, owner_id: i32, pet_id: i32, visit: &Visit) -> ServiceResult<Visit> {
        let on_error = self.resource.handler("addVisit", visit.clone());
        let url = self.resource.url(&[
            OWNERS_PATH,
            owner_id.to_string().as_str(),
            PETS_PATH,
            pet_id.to_string().as_str(),
            VISITS_PATH,
        ]);
        self.resource.post(url, visit, &on_error).await
    }

    pub async fn update_visit(&self, visit_id: i32, visit: &Visit) -> ServiceResult<()> {
        let on_error = self.resource.handler("updateVisit", visit.clone());
        let url = self
            .resource
            .url(&[VISITS_PATH, visit_id.to_string().as_str()]);
        self.resource.put(url, visit, &on_error).await
    }

    pub async fn delete_visit(&self, visit_id: i32) -> ServiceResult<()> {
        let on_error = self.resource.handler("deleteVisit", 0_i32);
        let url = self
            .resource
            .url(&[VISITS_PATH, visit_id.to_string().as_str()]);
        self.resource.delete(url, &on_error).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{fixture, url};
    use chrono::NaiveDate;
    use http::{Method, StatusCode};

    #[tokio::test]
    async fn test_add_visit_posts_under_owner_and_pet() {
        let f = fixture();
        f.transport.respond(
            StatusCode::CREATED,
            r#"{"id":5,"date":"2013-01-01","description":"rabies shot","petId":7}"#,
        );
        let service = VisitService::new(f.transport.clone(), &f.cfg, &f.errors);
        let visit = Visit {
            date: NaiveDate::from_ymd_opt(2013, 1, 1),
            description: "rabies shot".into(),
            ..Visit::default()
        };

        let created = service.add_visit(6, 7, &visit).await.expect("add should succeed");

        assert_eq!(created.pet_id, Some(7));
        let request = f.transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, url("owners/6/pets/7/visits"));
        assert_eq!(
            request.body,
            Some(serde_json::json!({"date": "2013-01-01", "description": "rabies shot"}))
        );
    }

    #[tokio::test]
    async fn test_get_visit_by_id_decode_failure_is_client_side() {
        let f = fixture();
        f.transport.respond(StatusCode::OK, r#"{"date":"yesterday"}"#);
        let service = VisitService::new(f.transport.clone(), &f.cfg, &f.errors);

        let err = service.get_visit_by_id(1).await.expect_err("bad date should fail");

        assert!(err.message().starts_with("failed to parse response body"));
        assert!(f.log.lines()[1].starts_with("VisitService::getVisitById failed: "));
    }
}
