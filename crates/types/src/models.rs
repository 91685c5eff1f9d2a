use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A kind of animal the clinic treats (dog, cat, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
}

/// A veterinary specialty such as radiology or surgery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub specialties: Vec<Specialty>,
}

/// A single visit of a pet to the clinic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Visit date, `YYYY-MM-DD` on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,
    #[serde(default)]
    pub name: String,
    /// Birth date, `YYYY-MM-DD` on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<PetType>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

/// A pet owner together with their pets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

/// One rejected field of a request body.
///
/// The backend serialises a JSON array of these into the `errors` response header when it
/// rejects a request body. Clients read `error_message` of the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingError {
    #[serde(default)]
    pub object_name: String,
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub field_value: String,
    #[serde(default)]
    pub error_message: String,
}

impl BindingError {
    pub fn new(
        object_name: impl Into<String>,
        field_name: impl Into<String>,
        field_value: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            field_name: field_name.into(),
            field_value: field_value.into(),
            error_message: error_message.into(),
        }
    }
}
