//! One-stop client over the six entity services.

use crate::config::ClientConfig;
use crate::diagnostics::{DiagnosticLog, TracingLog};
use crate::error::ClientResult;
use crate::error_handler::HttpErrorHandler;
use crate::services::{
    OwnerService, PetService, PetTypeService, SpecialtyService, VetService, VisitService,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

/// The six entity services sharing one transport and one diagnostic log.
#[derive(Clone)]
pub struct ClinicClient {
    pub owners: OwnerService,
    pub pets: PetService,
    pub pet_types: PetTypeService,
    pub specialties: SpecialtyService,
    pub vets: VetService,
    pub visits: VisitService,
}

impl ClinicClient {
    /// Builds a client over `reqwest` that logs failures through `tracing`.
    pub fn new(cfg: &ClientConfig) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(cfg)?;
        Ok(Self::with_transport(cfg, Arc::new(transport), Arc::new(TracingLog)))
    }

    pub fn with_transport(
        cfg: &ClientConfig,
        transport: Arc<dyn HttpTransport>,
        log: Arc<dyn DiagnosticLog>,
    ) -> Self {
        let errors = HttpErrorHandler::new(log);

        Self {
            owners: OwnerService::new(Arc::clone(&transport), cfg, &errors),
            pets: PetService::new(Arc::clone(&transport), cfg, &errors),
            pet_types: PetTypeService::new(Arc::clone(&transport), cfg, &errors),
            specialties: SpecialtyService::new(Arc::clone(&transport), cfg, &errors),
            vets: VetService::new(Arc::clone(&transport), cfg, &errors),
            visits: VisitService::new(transport, cfg, &errors),
        }
    }
}
