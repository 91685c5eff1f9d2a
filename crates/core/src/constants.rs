//! Constants used throughout the petclinic core crate.

/// Base URL of the clinic REST API when `REST_API_URL` is not set.
pub const DEFAULT_REST_API_URL: &str = "http://localhost:9966/petclinic/api/";

/// Request timeout in seconds when `REST_API_TIMEOUT_SECS` is not set.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response header carrying the JSON list of field binding errors.
pub const ERRORS_HEADER: &str = "errors";

/// Field of a binding error holding the human-readable message.
pub const ERROR_MESSAGE_FIELD: &str = "errorMessage";

/// Message used for a client-side failure that carries no description at all.
pub const UNKNOWN_NETWORK_ERROR: &str = "network error";

/// Tracing target for diagnostic lines written by the error normalizer.
pub const DIAGNOSTIC_TARGET: &str = "petclinic::http";

pub const OWNERS_PATH: &str = "owners";
pub const PETS_PATH: &str = "pets";
pub const PET_TYPES_PATH: &str = "pettypes";
pub const SPECIALTIES_PATH: &str = "specialties";
pub const VETS_PATH: &str = "vets";
pub const VISITS_PATH: &str = "visits";
