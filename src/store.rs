//! In-memory record store for athletes and the workout catalog
//!
//! `RecordStore` owns both collections and is the only writer. It loads snapshots from a
//! `KeyValueStore` when opened, seeds an empty catalog, and writes both collections back
//! after every athlete mutation and once more when dropped.
//!
//! Durability is best-effort. Corrupt snapshots load as empty collections and failed
//! flushes are logged; neither is surfaced to callers of the CRUD operations.

use rand::Rng;
use tracing::{debug, info};

use crate::error::{Result, WorkoutRsError};
use crate::generator::WorkoutGenerator;
use crate::models::{Athlete, Workout};
use crate::seed::SeedSource;
use crate::storage::{
    encode_snapshot, read_snapshot, KeyValueStore, ATHLETE_DATA_KEY, WORKOUT_DATA_KEY,
};
use crate::vocabulary::{WorkoutKind, WorkoutType};

/// Repository of athletes and workouts backed by a key-value store
pub struct RecordStore<S: KeyValueStore> {
    storage: Option<S>,
    athletes: Vec<Athlete>,
    workouts: Vec<Workout>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Open the store, loading persisted snapshots and seeding an empty catalog
    pub fn open(storage: S, seed: &SeedSource) -> Self {
        let athletes = load_collection::<Athlete>(&storage, ATHLETE_DATA_KEY);
        let workouts = load_collection::<Workout>(&storage, WORKOUT_DATA_KEY);

        let mut store = Self {
            storage: Some(storage),
            athletes,
            workouts,
        };

        if store.workouts.is_empty() {
            store.seed_catalog(seed);
        }

        info!(
            athletes = store.athletes.len(),
            workouts = store.workouts.len(),
            "Record store ready"
        );
        store
    }

    fn seed_catalog(&mut self, seed: &SeedSource) {
        match seed.load() {
            Ok(workouts) => {
                info!(count = workouts.len(), "Seeded workout catalog");
                self.workouts.extend(workouts);
            }
            Err(e) => WorkoutRsError::from(e).log("Seeding failed, catalog left unchanged"),
        }
    }

    /// Write both collections to storage
    pub fn save(&mut self) -> Result<()> {
        let athletes = encode_snapshot(ATHLETE_DATA_KEY, &self.athletes)?;
        let workouts = encode_snapshot(WORKOUT_DATA_KEY, &self.workouts)?;

        if let Some(storage) = self.storage.as_mut() {
            storage.set_many(&[(ATHLETE_DATA_KEY, athletes), (WORKOUT_DATA_KEY, workouts)])?;
        }

        debug!(
            athletes = self.athletes.len(),
            workouts = self.workouts.len(),
            "Flushed record store"
        );
        Ok(())
    }

    // Mutations report success to callers even when the flush fails.
    fn flush(&mut self) {
        if let Err(e) = self.save() {
            e.log("Failed to flush record store");
        }
    }

    /// Flush and hand back the storage backend
    pub fn into_storage(mut self) -> S {
        self.flush();
        self.storage
            .take()
            .expect("storage is only taken when the store is consumed")
    }

    // ---------------------------------------------------------------------------------------
    // Athletes

    /// Add an athlete, keeping the collection sorted by last name
    pub fn add_athlete(&mut self, athlete: Athlete) {
        debug!(athlete = athlete.id(), "Adding athlete");
        self.athletes.push(athlete);
        self.sort_athletes();
        self.flush();
    }

    /// Generate a workout plan for `athlete` from the catalog, then add it
    pub fn enroll_athlete<R: Rng>(
        &mut self,
        mut athlete: Athlete,
        generator: &mut WorkoutGenerator<R>,
    ) -> Athlete {
        generator.assign(&mut athlete, &self.workouts);
        self.add_athlete(athlete.clone());
        athlete
    }

    /// Replace every field except `id` and `workouts` of the athlete with the given id
    ///
    /// Unknown ids are ignored.
    pub fn modify_athlete(&mut self, id: &str, patch: &Athlete) {
        let Some(stored) = self.athletes.iter_mut().find(|a| a.id() == id) else {
            debug!(athlete = id, "Modify ignored, athlete not found");
            return;
        };

        stored.first_name = patch.first_name.clone();
        stored.last_name = patch.last_name.clone();
        stored.height = patch.height;
        stored.weight = patch.weight;
        stored.date_of_birth = patch.date_of_birth;
        stored.sport = patch.sport;
        stored.gender = patch.gender;
        stored.skill = patch.skill;

        self.sort_athletes();
        self.flush();
    }

    /// Remove the athlete with the given id; unknown ids are ignored
    pub fn delete_athlete(&mut self, id: &str) {
        let Some(index) = self.athletes.iter().position(|a| a.id() == id) else {
            debug!(athlete = id, "Delete ignored, athlete not found");
            return;
        };

        self.athletes.remove(index);
        self.flush();
    }

    pub fn get_athlete_count(&self) -> usize {
        self.athletes.len()
    }

    /// Athlete at `index` in last-name order
    pub fn get_athlete(&self, index: usize) -> Result<Athlete> {
        self.athletes
            .get(index)
            .cloned()
            .ok_or(WorkoutRsError::IndexOutOfRange {
                collection: "athlete",
                index,
                len: self.athletes.len(),
            })
    }

    /// Look up an athlete by id
    ///
    /// When not found, returns `false` with a fresh placeholder athlete that is not stored.
    pub fn get_athlete_by_id(&self, id: &str) -> (bool, Athlete) {
        match self.find_athlete(id) {
            Some(athlete) => (true, athlete.clone()),
            None => (false, Athlete::new()),
        }
    }

    pub fn find_athlete(&self, id: &str) -> Option<&Athlete> {
        self.athletes.iter().find(|a| a.id() == id)
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }

    fn sort_athletes(&mut self) {
        self.athletes.sort_by(|a, b| a.last_name.cmp(&b.last_name));
    }

    // ---------------------------------------------------------------------------------------
    // Workouts

    pub fn get_workout_count(&self) -> usize {
        self.workouts.len()
    }

    /// Workout at `index` in catalog order
    pub fn get_workout(&self, index: usize) -> Result<Workout> {
        self.workouts
            .get(index)
            .cloned()
            .ok_or(WorkoutRsError::IndexOutOfRange {
                collection: "workout",
                index,
                len: self.workouts.len(),
            })
    }

    pub fn get_workout_by_id(&self, id: &str) -> Option<Workout> {
        self.workouts.iter().find(|w| w.id() == id).cloned()
    }

    /// Append a workout to the catalog
    ///
    /// The catalog is not flushed here; the workout reaches storage with the next athlete
    /// mutation or when the store is dropped.
    pub fn add_workout(&mut self, workout: Workout) {
        debug!(workout = workout.id(), "Adding workout to catalog");
        self.workouts.push(workout);
    }

    pub fn get_workouts_by_type(&self, workout_type: WorkoutType) -> Vec<Workout> {
        self.workouts
            .iter()
            .filter(|w| w.workout_type == workout_type)
            .cloned()
            .collect()
    }

    pub fn get_workouts_by_kind(&self, kind: WorkoutKind) -> Vec<Workout> {
        self.workouts
            .iter()
            .filter(|w| w.kind == kind)
            .cloned()
            .collect()
    }

    /// Resolve an athlete's plan against the catalog, skipping ids no longer present
    pub fn workouts_for_athlete(&self, athlete: &Athlete) -> Vec<Workout> {
        athlete
            .workouts
            .iter()
            .filter_map(|id| self.get_workout_by_id(id))
            .collect()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }
}

impl<S: KeyValueStore> Drop for RecordStore<S> {
    fn drop(&mut self) {
        if self.storage.is_some() {
            self.flush();
        }
    }
}

fn load_collection<T: serde::de::DeserializeOwned>(
    storage: &impl KeyValueStore,
    key: &str,
) -> Vec<T> {
    match read_snapshot::<T>(storage, key) {
        Ok(Some(items)) => items,
        Ok(None) => {
            debug!(key, "No snapshot stored");
            Vec::new()
        }
        Err(e) => {
            WorkoutRsError::from(e).log(&format!("Snapshot {} unreadable, starting empty", key));
            Vec::new()
        }
    }
}
