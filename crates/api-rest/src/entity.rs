//! Per-entity rules of the stub backend: which table a kind lives in, how request bodies are
//! validated, and how nested collections are assembled and cleaned up.

use crate::store::{ClinicStore, Table};
use petclinic_types::{BindingError, Owner, Pet, PetType, Specialty, Vet, Visit};
use serde::de::DeserializeOwned;
use serde::Serialize;

const MUST_NOT_BE_BLANK: &str = "must not be blank";
const MUST_NOT_BE_NULL: &str = "must not be null";
const TELEPHONE_OUT_OF_BOUNDS: &str = "numeric value out of bounds (<10 digits>.<0 digits> expected)";

/// An entity kind served by the generic CRUD handlers.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name reported in `BindingError::object_name` and in 404 bodies.
    const OBJECT_NAME: &'static str;

    fn id(&self) -> Option<i32>;

    fn set_id(&mut self, id: i32);

    fn table(store: &ClinicStore) -> &Table<Self>;

    fn validate(&self) -> Vec<BindingError>;

    /// Fills nested collections from their child tables.
    fn hydrate(self, _store: &ClinicStore) -> Self {
        self
    }

    /// Drops client-supplied nested data before the row is stored.
    fn prepare(self) -> Self {
        self
    }

    /// Carries over fields of `existing` that the update body left unset.
    fn merge_update(self, _existing: &Self) -> Self {
        self
    }

    /// Removes rows that belong to the deleted entity.
    fn cascade_delete(_store: &ClinicStore, _id: i32) {}
}

/// Collects errors for the named text fields that are empty or whitespace only.
fn require_text(object: &str, fields: &[(&str, &str)]) -> Vec<BindingError> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, value)| BindingError::new(object, *name, *value, MUST_NOT_BE_BLANK))
        .collect()
}

fn telephone_in_bounds(telephone: &str) -> bool {
    (1..=10).contains(&telephone.len()) && telephone.chars().all(|c| c.is_ascii_digit())
}

impl Entity for Owner {
    const OBJECT_NAME: &'static str = "owner";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(store: &ClinicStore) -> &Table<Self> {
        &store.owners
    }

    fn validate(&self) -> Vec<BindingError> {
        let mut errors = require_text(
            Self::OBJECT_NAME,
            &[
                ("firstName", self.first_name.as_str()),
                ("lastName", self.last_name.as_str()),
                ("address", self.address.as_str()),
                ("city", self.city.as_str()),
            ],
        );
        if !telephone_in_bounds(&self.telephone) {
            errors.push(BindingError::new(
                Self::OBJECT_NAME,
                "telephone",
                &self.telephone,
                TELEPHONE_OUT_OF_BOUNDS,
            ));
        }
        errors
    }

    fn hydrate(mut self, store: &ClinicStore) -> Self {
        self.pets = store
            .pets
            .all()
            .into_iter()
            .filter(|pet| pet.owner_id.is_some() && pet.owner_id == self.id)
            .map(|pet| pet.hydrate(store))
            .collect();
        self
    }

    fn prepare(mut self) -> Self {
        self.pets.clear();
        self
    }

    fn cascade_delete(store: &ClinicStore, id: i32) {
        for pet_id in store.pets.remove_where(|pet| pet.owner_id == Some(id)) {
            Pet::cascade_delete(store, pet_id);
        }
    }
}

impl Entity for Pet {
    const OBJECT_NAME: &'static str = "pet";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(store: &ClinicStore) -> &Table<Self> {
        &store.pets
    }

    fn validate(&self) -> Vec<BindingError> {
        let mut errors = require_text(Self::OBJECT_NAME, &[("name", self.name.as_str())]);
        if self.birth_date.is_none() {
            errors.push(BindingError::new(
                Self::OBJECT_NAME,
                "birthDate",
                "",
                MUST_NOT_BE_NULL,
            ));
        }
        if self.pet_type.is_none() {
            errors.push(BindingError::new(
                Self::OBJECT_NAME,
                "type",
                "",
                MUST_NOT_BE_NULL,
            ));
        }
        errors
    }

    fn hydrate(mut self, store: &ClinicStore) -> Self {
        self.visits = store
            .visits
            .all()
            .into_iter()
            .filter(|visit| visit.pet_id.is_some() && visit.pet_id == self.id)
            .collect();
        self
    }

    fn prepare(mut self) -> Self {
        self.visits.clear();
        self
    }

    fn merge_update(mut self, existing: &Self) -> Self {
        if self.owner_id.is_none() {
            self.owner_id = existing.owner_id;
        }
        self
    }

    fn cascade_delete(store: &ClinicStore, id: i32) {
        store.visits.remove_where(|visit| visit.pet_id == Some(id));
    }
}

impl Entity for Visit {
    const OBJECT_NAME: &'static str = "visit";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(store: &ClinicStore) -> &Table<Self> {
        &store.visits
    }

    fn validate(&self) -> Vec<BindingError> {
        require_text(Self::OBJECT_NAME, &[("description", self.description.as_str())])
    }

    fn prepare(mut self) -> Self {
        if self.date.is_none() {
            self.date = Some(chrono::Local::now().date_naive());
        }
        self
    }

    fn merge_update(mut self, existing: &Self) -> Self {
        if self.pet_id.is_none() {
            self.pet_id = existing.pet_id;
        }
        self
    }
}

impl Entity for PetType {
    const OBJECT_NAME: &'static str = "petType";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(store: &ClinicStore) -> &Table<Self> {
        &store.pet_types
    }

    fn validate(&self) -> Vec<BindingError> {
        require_text(Self::OBJECT_NAME, &[("name", self.name.as_str())])
    }
}

impl Entity for Specialty {
    const OBJECT_NAME: &'static str = "specialty";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(store: &ClinicStore) -> &Table<Self> {
        &store.specialties
    }

    fn validate(&self) -> Vec<BindingError> {
        require_text(Self::OBJECT_NAME, &[("name", self.name.as_str())])
    }
}

impl Entity for Vet {
    const OBJECT_NAME: &'static str = "vet";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn table(store: &ClinicStore) -> &Table<Self> {
        &store.vets
    }

    fn validate(&self) -> Vec<BindingError> {
        require_text(
            Self::OBJECT_NAME,
            &[("firstName", self.first_name.as_str()), ("lastName", self.last_name.as_str())],
        )
    }
}
