//! Request handlers for the stub backend.
//!
//! The CRUD handlers are generic over [`Entity`] and are instantiated once per resource in
//! [`crate::router`]. Only the nested creation routes and the owner search have handlers of
//! their own.

use crate::entity::Entity;
use crate::error::{ApiError, ApiResult};
use crate::store::ClinicStore;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use petclinic_types::{BindingError, Owner, Pet, Visit};
use serde::Deserialize;
use std::sync::Arc;

pub type AppState = Arc<ClinicStore>;

fn not_found<E: Entity>(id: i32) -> ApiError {
    ApiError::NotFound {
        kind: E::OBJECT_NAME,
        id,
    }
}

fn check<E: Entity>(entity: &E) -> ApiResult<()> {
    let errors = entity.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

fn store_new<E: Entity>(store: &ClinicStore, entity: E) -> E {
    let row = entity.prepare();
    let stored = E::table(store).insert_with(|id| {
        let mut row = row;
        row.set_id(id);
        row
    });
    stored.hydrate(store)
}

/// An empty listing is answered with 404, as the clinic backend does.
fn non_empty<E: Entity>(rows: Vec<E>) -> ApiResult<Json<Vec<E>>> {
    if rows.is_empty() {
        Err(ApiError::NoneFound(E::OBJECT_NAME))
    } else {
        Ok(Json(rows))
    }
}

pub async fn list<E: Entity>(State(store): State<AppState>) -> ApiResult<Json<Vec<E>>> {
    let rows = E::table(&store)
        .all()
        .into_iter()
        .map(|row| row.hydrate(&store))
        .collect();
    non_empty(rows)
}

pub async fn get_one<E: Entity>(
    State(store): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<E>> {
    E::table(&store)
        .get(id)
        .map(|row| Json(row.hydrate(&store)))
        .ok_or_else(|| not_found::<E>(id))
}

pub async fn create<E: Entity>(
    State(store): State<AppState>,
    Json(entity): Json<E>,
) -> ApiResult<(StatusCode, Json<E>)> {
    check(&entity)?;
    let stored = store_new(&store, entity);
    tracing::info!("created {} {:?}", E::OBJECT_NAME, stored.id());
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update<E: Entity>(
    State(store): State<AppState>,
    Path(id): Path<i32>,
    Json(entity): Json<E>,
) -> ApiResult<StatusCode> {
    let existing = E::table(&store).get(id).ok_or_else(|| not_found::<E>(id))?;

    if let Some(body_id) = entity.id().filter(|body_id| *body_id != id) {
        return Err(ApiError::Validation(vec![BindingError::new(
            E::OBJECT_NAME,
            "id",
            body_id.to_string(),
            format!("does not match path id {id}"),
        )]));
    }
    check(&entity)?;

    let mut row = entity.prepare().merge_update(&existing);
    row.set_id(id);
    if !E::table(&store).replace(id, row) {
        return Err(not_found::<E>(id));
    }
    tracing::info!("updated {} {}", E::OBJECT_NAME, id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove<E: Entity>(
    State(store): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    E::table(&store).remove(id).ok_or_else(|| not_found::<E>(id))?;
    E::cascade_delete(&store, id);
    tracing::info!("deleted {} {}", E::OBJECT_NAME, id);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSearch {
    last_name: Option<String>,
}

/// `GET owners`, optionally filtered by last-name prefix.
pub async fn list_owners(
    State(store): State<AppState>,
    Query(search): Query<OwnerSearch>,
) -> ApiResult<Json<Vec<Owner>>> {
    let prefix = search.last_name.unwrap_or_default().to_lowercase();
    let owners = store
        .owners
        .all()
        .into_iter()
        .filter(|owner| owner.last_name.to_lowercase().starts_with(&prefix))
        .map(|owner| owner.hydrate(&store))
        .collect();
    non_empty(owners)
}

/// `POST owners/{ownerId}/pets`
pub async fn create_owner_pet(
    State(store): State<AppState>,
    Path(owner_id): Path<i32>,
    Json(mut pet): Json<Pet>,
) -> ApiResult<(StatusCode, Json<Pet>)> {
    if !store.owners.contains(owner_id) {
        return Err(not_found::<Owner>(owner_id));
    }
    check(&pet)?;
    pet.owner_id = Some(owner_id);
    let stored = store_new(&store, pet);
    tracing::info!("created pet {:?} for owner {}", stored.id, owner_id);
    Ok((StatusCode::CREATED, Json(stored)))
}

/// `POST owners/{ownerId}/pets/{petId}/visits`
pub async fn create_pet_visit(
    State(store): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Json(mut visit): Json<Visit>,
) -> ApiResult<(StatusCode, Json<Visit>)> {
    if !store.owners.contains(owner_id) {
        return Err(not_found::<Owner>(owner_id));
    }
    match store.pets.get(pet_id) {
        Some(pet) if pet.owner_id == Some(owner_id) => {}
        _ => return Err(not_found::<Pet>(pet_id)),
    }
    check(&visit)?;
    visit.pet_id = Some(pet_id);
    let stored = store_new(&store, visit);
    tracing::info!("created visit {:?} for pet {}", stored.id, pet_id);
    Ok((StatusCode::CREATED, Json(stored)))
}
