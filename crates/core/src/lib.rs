//! # Petclinic Core
//!
//! Typed client for the veterinary-clinic REST API.
//!
//! This crate contains:
//! - The error normalizer that turns every failed HTTP call into one message
//!   ([`error_handler`])
//! - The HTTP transport seam and its `reqwest` implementation ([`transport`])
//! - One service per entity: owners, pets, pet types, specialties, vets and visits
//!   ([`services`])
//! - Startup configuration ([`config`])
//!
//! **No UI concerns**: presenting messages to a user is left to the caller, which receives a
//! [`NormalizedFailure`] from every failed operation.

pub mod client;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod error_handler;
pub mod services;
pub mod transport;

pub use client::ClinicClient;
pub use config::ClientConfig;
pub use diagnostics::{DiagnosticLog, MemoryLog, TracingLog};
pub use error::{ClientError, ClientResult};
pub use error_handler::{
    derive_message, FailureHandler, HttpErrorHandler, NormalizedFailure, OperationContext,
    ServiceErrorHandler, ServiceResult,
};
pub use services::{
    OwnerService, PetService, PetTypeService, SpecialtyService, VetService, VisitService,
};
pub use transport::{
    FailureBody, HttpTransport, ReqwestTransport, TransportFailure, TransportRequest,
    TransportResponse,
};

pub use petclinic_types as types;
