//! In-memory storage for the stub backend.
//!
//! Each entity kind lives in its own [`Table`], keyed by id. Nested collections (an owner's pets,
//! a pet's visits) are not stored inside their parent; they are assembled on read from the child
//! tables.

use chrono::NaiveDate;
use petclinic_types::{Owner, Pet, PetType, Specialty, Vet, Visit};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Rows of one entity kind.
#[derive(Debug)]
pub struct Table<E> {
    rows: RwLock<BTreeMap<i32, E>>,
    next_id: AtomicI32,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl<E: Clone> Table<E> {
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<i32, E>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<i32, E>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All rows in id order.
    pub fn all(&self) -> Vec<E> {
        self.read().values().cloned().collect()
    }

    pub fn get(&self, id: i32) -> Option<E> {
        self.read().get(&id).cloned()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.read().contains_key(&id)
    }

    /// Stores `build(id)` under a freshly allocated id and returns it.
    pub fn insert_with(&self, build: impl FnOnce(i32) -> E) -> E {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.write().insert(id, row.clone());
        row
    }

    /// Replaces an existing row. Returns `false` if `id` is unknown.
    pub fn replace(&self, id: i32, row: E) -> bool {
        match self.write().get_mut(&id) {
            Some(existing) => {
                *existing = row;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: i32) -> Option<E> {
        self.write().remove(&id)
    }

    /// Removes every row for which `remove` returns true and returns their ids.
    pub fn remove_where(&self, mut remove: impl FnMut(&E) -> bool) -> Vec<i32> {
        let mut rows = self.write();
        let ids: Vec<i32> = rows
            .iter()
            .filter(|(_, row)| remove(row))
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            rows.remove(id);
        }
        ids
    }
}

/// All tables of the stub clinic.
#[derive(Debug, Default)]
pub struct ClinicStore {
    pub owners: Table<Owner>,
    pub pets: Table<Pet>,
    pub pet_types: Table<PetType>,
    pub specialties: Table<Specialty>,
    pub vets: Table<Vet>,
    pub visits: Table<Visit>,
}

impl ClinicStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the classic petclinic sample data.
    pub fn seeded() -> Self {
        let store = Self::new();

        let pet_types: Vec<PetType> = ["cat", "dog", "lizard", "snake", "bird", "hamster"]
            .into_iter()
            .map(|name| {
                store.pet_types.insert_with(|id| PetType {
                    id: Some(id),
                    name: name.into(),
                })
            })
            .collect();

        let specialties: Vec<Specialty> = ["radiology", "surgery", "dentistry"]
            .into_iter()
            .map(|name| {
                store.specialties.insert_with(|id| Specialty {
                    id: Some(id),
                    name: name.into(),
                })
            })
            .collect();

        let vets = [
            ("James", "Carter", vec![]),
            ("Helen", "Leary", vec![0]),
            ("Linda", "Douglas", vec![1, 2]),
            ("Rafael", "Ortega", vec![1]),
            ("Henry", "Stevens", vec![0]),
            ("Sharon", "Jenkins", vec![]),
        ];
        for (first_name, last_name, specs) in vets {
            store.vets.insert_with(|id| Vet {
                id: Some(id),
                first_name: first_name.into(),
                last_name: last_name.into(),
                specialties: specs.iter().map(|i| specialties[*i].clone()).collect(),
            });
        }

        let owners = [
            ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
            ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
            ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
            ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
        ];
        let owner_ids: Vec<i32> = owners
            .into_iter()
            .map(|(first_name, last_name, address, city, telephone)| {
                store.owners.insert_with(|id| Owner {
                    id: Some(id),
                    first_name: first_name.into(),
                    last_name: last_name.into(),
                    address: address.into(),
                    city: city.into(),
                    telephone: telephone.into(),
                    pets: vec![],
                })
            })
            .filter_map(|owner| owner.id)
            .collect();

        let pets = [
            ("Leo", (2010, 9, 7), 0, 0),
            ("Basil", (2012, 8, 6), 5, 1),
            ("Rosy", (2011, 4, 17), 1, 2),
            ("Jewel", (2010, 3, 7), 1, 2),
            ("Iggy", (2010, 11, 30), 2, 3),
        ];
        let pet_ids: Vec<i32> = pets
            .into_iter()
            .map(|(name, (y, m, d), type_index, owner_index)| {
                store.pets.insert_with(|id| Pet {
                    id: Some(id),
                    owner_id: Some(owner_ids[owner_index]),
                    name: name.into(),
                    birth_date: NaiveDate::from_ymd_opt(y, m, d),
                    pet_type: Some(pet_types[type_index].clone()),
                    visits: vec![],
                })
            })
            .filter_map(|pet| pet.id)
            .collect();

        let visits = [
            (2, (2013, 1, 1), "rabies shot"),
            (3, (2013, 1, 2), "rabies shot"),
            (3, (2013, 1, 3), "neutered"),
        ];
        for (pet_index, (y, m, d), description) in visits {
            store.visits.insert_with(|id| Visit {
                id: Some(id),
                date: NaiveDate::from_ymd_opt(y, m, d),
                description: description.into(),
                pet_id: Some(pet_ids[pet_index]),
            });
        }

        store
    }
}
