use chrono::NaiveDate;
use tempfile::TempDir;
use workoutrs::{
    Athlete, Gender, KeyValueStore, RecordStore, SeedSource, Skill, Sport, SqliteKeyValueStore,
    Workout, WorkoutGenerator, WorkoutKind, WorkoutType,
};

/// Integration tests for the record store over a SQLite file, including process restarts

#[cfg(test)]
mod store_lifecycle_tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    const FOUR_WORKOUTS: &str = r#"{"Workouts": [
        {"id": "W1", "type": 0, "title": "Tempo run", "details": "20 min tempo", "difficulty": 1, "kind": 2},
        {"id": "W2", "type": 1, "title": "Pool drills", "details": "10x50 m", "difficulty": 0, "kind": 1},
        {"id": "W3", "type": 2, "title": "Hill repeats", "details": "6x3 min", "difficulty": 2, "kind": 2},
        {"id": "W4", "type": 4, "title": "Core circuit", "details": "3 rounds", "difficulty": 1, "kind": 3}
    ]}"#;

    fn seed() -> SeedSource {
        SeedSource::Inline(FOUR_WORKOUTS.to_string())
    }

    fn database_path(dir: &TempDir) -> PathBuf {
        dir.path().join("data").join("workoutrs.db")
    }

    fn open_store(dir: &TempDir) -> RecordStore<SqliteKeyValueStore> {
        let storage = SqliteKeyValueStore::open(database_path(dir)).unwrap();
        RecordStore::open(storage, &seed())
    }

    fn create_jane_doe() -> Athlete {
        let mut athlete = Athlete::new();
        athlete.first_name = "Jane".to_string();
        athlete.last_name = "Doe".to_string();
        athlete.height = 170;
        athlete.weight = 65;
        athlete.sport = Sport::Soccer;
        athlete.gender = Gender::Female;
        athlete.skill = Skill::Intermediate;
        athlete.date_of_birth = NaiveDate::from_ymd_opt(1994, 6, 15).unwrap();
        athlete
    }

    /// Jane Doe gets a plan from a four-workout catalog and survives a restart intact
    #[test]
    fn test_enrolled_athlete_survives_restart() {
        let dir = TempDir::new().unwrap();

        let (id, plan) = {
            let mut store = open_store(&dir);
            assert_eq!(store.get_workout_count(), 4);

            let mut generator = WorkoutGenerator::seeded(2024);
            let enrolled = store.enroll_athlete(create_jane_doe(), &mut generator);

            let catalog: HashSet<&str> = ["W1", "W2", "W3", "W4"].into_iter().collect();
            assert!((1..=4).contains(&enrolled.workouts.len()));
            assert!(enrolled.workouts.iter().all(|id| catalog.contains(id.as_str())));

            (enrolled.id().to_string(), enrolled.workouts.clone())
        };

        let store = open_store(&dir);
        let (found, reloaded) = store.get_athlete_by_id(&id);
        assert!(found);
        assert_eq!(reloaded.first_name, "Jane");
        assert_eq!(reloaded.last_name, "Doe");
        assert_eq!(reloaded.height, 170);
        assert_eq!(reloaded.weight, 65);
        assert_eq!(reloaded.sport, Sport::Soccer);
        assert_eq!(reloaded.gender, Gender::Female);
        assert_eq!(reloaded.skill, Skill::Intermediate);
        assert_eq!(reloaded.date_of_birth, NaiveDate::from_ymd_opt(1994, 6, 15).unwrap());
        assert_eq!(reloaded.workouts, plan);
    }

    #[test]
    fn test_catalog_is_seeded_only_once() {
        let dir = TempDir::new().unwrap();

        {
            let store = open_store(&dir);
            assert_eq!(store.get_workout_count(), 4);
        }

        let store = open_store(&dir);
        assert_eq!(store.get_workout_count(), 4);
        let ids: Vec<&str> = store.workouts().iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec!["W1", "W2", "W3", "W4"]);
    }

    #[test]
    fn test_catalog_additions_persist_at_drop() {
        let dir = TempDir::new().unwrap();

        {
            let mut store = open_store(&dir);
            let mut workout = Workout::with_id("W5");
            workout.title = "Rowing intervals".to_string();
            workout.workout_type = WorkoutType::Cardio;
            workout.kind = WorkoutKind::Main;
            store.add_workout(workout);
        }

        let store = open_store(&dir);
        assert_eq!(store.get_workout_count(), 5);
        let rowing = store.get_workout_by_id("W5").unwrap();
        assert_eq!(rowing.title, "Rowing intervals");
        assert_eq!(rowing.workout_type, WorkoutType::Cardio);
    }

    #[test]
    fn test_modify_and_delete_persist() {
        let dir = TempDir::new().unwrap();

        let (kept_id, deleted_id) = {
            let mut store = open_store(&dir);
            let jane = create_jane_doe();
            let kept_id = jane.id().to_string();
            store.add_athlete(jane);

            let mut john = Athlete::new();
            john.first_name = "John".to_string();
            john.last_name = "Smith".to_string();
            let deleted_id = john.id().to_string();
            store.add_athlete(john);

            let mut patch = create_jane_doe();
            patch.weight = 63;
            patch.skill = Skill::Advanced;
            store.modify_athlete(&kept_id, &patch);
            store.delete_athlete(&deleted_id);

            (kept_id, deleted_id)
        };

        let store = open_store(&dir);
        assert_eq!(store.get_athlete_count(), 1);
        assert!(!store.get_athlete_by_id(&deleted_id).0);

        let (found, jane) = store.get_athlete_by_id(&kept_id);
        assert!(found);
        assert_eq!(jane.weight, 63);
        assert_eq!(jane.skill, Skill::Advanced);
    }

    #[test]
    fn test_athletes_reload_in_last_name_order() {
        let dir = TempDir::new().unwrap();

        {
            let mut store = open_store(&dir);
            for (first, last) in [("Zoe", "Walker"), ("Ann", "Adams"), ("Kim", "Lee")] {
                let mut athlete = Athlete::new();
                athlete.first_name = first.to_string();
                athlete.last_name = last.to_string();
                store.add_athlete(athlete);
            }
        }

        let store = open_store(&dir);
        let names: Vec<String> = (0..store.get_athlete_count())
            .map(|i| store.get_athlete(i).unwrap().last_name)
            .collect();
        assert_eq!(names, vec!["Adams", "Lee", "Walker"]);
    }

    #[test]
    fn test_corrupt_database_values_start_empty() {
        let dir = TempDir::new().unwrap();

        {
            let mut storage = SqliteKeyValueStore::open(database_path(&dir)).unwrap();
            storage.set("ATHLETE_DATA", b"not json").unwrap();
        }

        let store = open_store(&dir);
        assert_eq!(store.get_athlete_count(), 0);
        assert_eq!(store.get_workout_count(), 4);
    }

    #[test]
    fn test_into_storage_writes_both_snapshots() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add_athlete(create_jane_doe());

        let storage = store.into_storage();
        assert!(storage.get("ATHLETE_DATA").unwrap().is_some());
        assert!(storage.get("WORKOUT_DATA").unwrap().is_some());
    }

    #[test]
    fn test_bundled_catalog_seeds_fresh_database() {
        let dir = TempDir::new().unwrap();
        let storage = SqliteKeyValueStore::open(database_path(&dir)).unwrap();
        let store = RecordStore::open(storage, &SeedSource::Bundled);

        assert!(store.get_workout_count() > 0);
        for workout_type in [
            WorkoutType::Running,
            WorkoutType::Swimming,
            WorkoutType::Cycling,
            WorkoutType::WeightLifting,
            WorkoutType::Strength,
            WorkoutType::Cardio,
        ] {
            assert!(!store.get_workouts_by_type(workout_type).is_empty());
        }
    }

    #[test]
    fn test_missing_seed_file_leaves_catalog_empty() {
        let dir = TempDir::new().unwrap();
        let storage = SqliteKeyValueStore::open(database_path(&dir)).unwrap();
        let store = RecordStore::open(
            storage,
            &SeedSource::File(dir.path().join("no-such-catalog.json")),
        );
        assert_eq!(store.get_workout_count(), 0);

        let mut generator = WorkoutGenerator::seeded(1);
        let mut store = store;
        let enrolled = store.enroll_athlete(create_jane_doe(), &mut generator);
        assert!(enrolled.workouts.is_empty());
    }
}
