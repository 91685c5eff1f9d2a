//! # Petclinic Types
//!
//! Wire models shared by the petclinic client and the stub backend.
//!
//! Every model serialises with camelCase field names, matching the clinic REST API. Identifiers
//! are optional because an entity that has not been stored yet has no id.

mod models;

pub use models::{BindingError, Owner, Pet, PetType, Specialty, Vet, Visit};
