//! Workout catalog bootstrap
//!
//! The catalog ships as a JSON document with a single `Workouts` array. It is parsed as a
//! whole: one malformed entry rejects the document and the catalog stays as it was.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::SeedError;
use crate::models::Workout;
use crate::vocabulary::{Difficulty, Vocabulary, WorkoutKind, WorkoutType};

/// Catalog compiled into the binary
pub const BUNDLED_CATALOG: &str = include_str!("../data/workouts.json");

/// Where the initial workout catalog comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SeedSource {
    /// The catalog bundled with the crate
    #[default]
    Bundled,
    /// A catalog file on disk
    File(PathBuf),
    /// A catalog document held in memory
    Inline(String),
    /// Never seed; an empty catalog stays empty
    Disabled,
}

impl SeedSource {
    /// Load and decode the catalog from this source
    pub fn load(&self) -> Result<Vec<Workout>, SeedError> {
        match self {
            SeedSource::Bundled => parse_seed_document(BUNDLED_CATALOG),
            SeedSource::File(path) => {
                let content = fs::read_to_string(path).map_err(|source| SeedError::Unreadable {
                    path: path.clone(),
                    source,
                })?;
                let workouts = parse_seed_document(&content)?;
                info!(path = %path.display(), count = workouts.len(), "Loaded seed catalog file");
                Ok(workouts)
            }
            SeedSource::Inline(document) => parse_seed_document(document),
            SeedSource::Disabled => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
    #[serde(rename = "Workouts")]
    workouts: Vec<SeedWorkout>,
}

#[derive(Debug, Deserialize)]
struct SeedWorkout {
    id: String,
    #[serde(rename = "type")]
    workout_type: i64,
    title: String,
    details: String,
    difficulty: i64,
    kind: i64,
}

impl From<SeedWorkout> for Workout {
    fn from(entry: SeedWorkout) -> Self {
        let mut workout = Workout::with_id(entry.id);
        workout.title = entry.title;
        workout.details = entry.details;
        workout.workout_type = WorkoutType::from_code_or_default(entry.workout_type);
        workout.difficulty = Difficulty::from_code_or_default(entry.difficulty);
        workout.kind = WorkoutKind::from_code_or_default(entry.kind);
        workout
    }
}

/// Parse a seed document into workouts, preserving file order
pub fn parse_seed_document(document: &str) -> Result<Vec<Workout>, SeedError> {
    let parsed: SeedDocument = serde_json::from_str(document)?;
    let workouts: Vec<Workout> = parsed.workouts.into_iter().map(Workout::from).collect();
    debug!(count = workouts.len(), "Parsed seed document");
    Ok(workouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    const SMALL_CATALOG: &str = r#"{
        "Workouts": [
            {"id": "W1", "type": 0, "title": "Run", "details": "Easy run", "difficulty": 0, "kind": 2},
            {"id": "W2", "type": 1, "title": "Swim", "details": "Drills", "difficulty": 3, "kind": 1}
        ]
    }"#;

    #[test]
    fn test_parse_preserves_order_and_fields() {
        let workouts = parse_seed_document(SMALL_CATALOG).unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].id(), "W1");
        assert_eq!(workouts[0].workout_type, WorkoutType::Running);
        assert_eq!(workouts[1].id(), "W2");
        assert_eq!(workouts[1].title, "Swim");
        assert_eq!(workouts[1].difficulty, Difficulty::Professional);
        assert_eq!(workouts[1].kind, WorkoutKind::WarmUp);
    }

    #[test]
    fn test_unknown_codes_use_fallbacks() {
        let document = r#"{"Workouts": [
            {"id": "W9", "type": 42, "title": "Mystery", "details": "", "difficulty": -1, "kind": 7}
        ]}"#;
        let workouts = parse_seed_document(document).unwrap();
        assert_eq!(workouts[0].workout_type, WorkoutType::Running);
        assert_eq!(workouts[0].difficulty, Difficulty::Easy);
        assert_eq!(workouts[0].kind, WorkoutKind::Main);
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(matches!(
            parse_seed_document("not json"),
            Err(SeedError::Malformed(_))
        ));
        assert!(parse_seed_document(r#"{"workouts": []}"#).is_err());
        // One entry missing its title rejects the whole array.
        let partial = r#"{"Workouts": [
            {"id": "W1", "type": 0, "title": "Run", "details": "", "difficulty": 0, "kind": 2},
            {"id": "W2", "type": 0, "details": "", "difficulty": 0, "kind": 2}
        ]}"#;
        assert!(parse_seed_document(partial).is_err());
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let workouts = SeedSource::Bundled.load().unwrap();
        assert!(!workouts.is_empty());

        let ids: HashSet<&str> = workouts.iter().map(|w| w.id()).collect();
        assert_eq!(ids.len(), workouts.len());

        for workout_type in WorkoutType::values() {
            assert!(workouts.iter().any(|w| w.workout_type == *workout_type));
        }
    }

    #[test]
    fn test_file_source() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(&path, SMALL_CATALOG).unwrap();

        let workouts = SeedSource::File(path).load().unwrap();
        assert_eq!(workouts.len(), 2);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let temp_dir = tempdir().unwrap();
        let result = SeedSource::File(temp_dir.path().join("missing.json")).load();
        assert!(matches!(result, Err(SeedError::Unreadable { .. })));
    }

    #[test]
    fn test_disabled_source_is_empty() {
        assert!(SeedSource::Disabled.load().unwrap().is_empty());
    }
}
