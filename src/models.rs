use chrono::{Datelike, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::vocabulary::{Difficulty, Gender, Skill, Sport, WorkoutKind, WorkoutType};

/// Identifier of an athlete (UUID v4 string)
pub type AthleteId = String;

/// Identifier of a workout (UUID v4 string, or the id carried by the seed file)
pub type WorkoutId = String;

/// Format used when rendering a date of birth
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

const CENTIMETERS_PER_INCH: f64 = 2.54;
const CENTIMETERS_PER_FOOT: f64 = 30.48;
const POUNDS_PER_KILOGRAM: f64 = 2.204_622_62;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Null or wrongly typed field values decode as the field default instead of failing the record.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|_| today()))
}

/// Athlete record with biographical and fitness attributes
///
/// Every field is optional on decode: a missing, null or wrongly typed field loads with that
/// field's default instead of rejecting the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    /// Unique identifier, fixed at construction
    #[serde(default, deserialize_with = "lenient")]
    id: AthleteId,

    #[serde(default, deserialize_with = "lenient")]
    pub first_name: String,

    /// Sort key of the athlete listing
    #[serde(default, deserialize_with = "lenient")]
    pub last_name: String,

    /// Height in centimeters
    #[serde(default, deserialize_with = "lenient")]
    pub height: i32,

    /// Weight in kilograms
    #[serde(default, deserialize_with = "lenient")]
    pub weight: i32,

    #[serde(default = "today", deserialize_with = "lenient_date")]
    pub date_of_birth: NaiveDate,

    #[serde(default, deserialize_with = "lenient")]
    pub sport: Sport,

    #[serde(default, deserialize_with = "lenient")]
    pub gender: Gender,

    #[serde(default, deserialize_with = "lenient")]
    pub skill: Skill,

    /// Assigned workout plan; duplicates are allowed
    #[serde(default, deserialize_with = "lenient")]
    pub workouts: Vec<WorkoutId>,
}

impl Default for Athlete {
    fn default() -> Self {
        Self::with_id(new_id())
    }
}

impl Athlete {
    /// Create an athlete with a freshly generated id and default attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an athlete with a caller-supplied id
    pub fn with_id(id: impl Into<AthleteId>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            height: 0,
            weight: 0,
            date_of_birth: today(),
            sport: Sport::default(),
            gender: Gender::default(),
            skill: Skill::default(),
            workouts: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Age in whole years as of today
    pub fn age(&self) -> i32 {
        self.age_on(today())
    }

    /// Age in whole years on the given date
    pub fn age_on(&self, date: NaiveDate) -> i32 {
        let mut years = date.year() - self.date_of_birth.year();
        if (date.month(), date.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            years -= 1;
        }
        years
    }

    pub fn date_of_birth_string(&self) -> String {
        self.date_of_birth.format(DATE_OF_BIRTH_FORMAT).to_string()
    }

    /// Height as (feet, inches). Non-positive heights read as 0 feet 0 inches.
    pub fn height_to_imperial(&self) -> (i32, i32) {
        if self.height <= 0 {
            return (0, 0);
        }

        let centimeters = f64::from(self.height);
        let feet = (centimeters / CENTIMETERS_PER_FOOT) as i32;
        let inches = (centimeters / CENTIMETERS_PER_INCH) as i32 % 12;
        (feet, inches)
    }

    /// Weight in whole pounds
    pub fn weight_to_pounds(&self) -> i32 {
        (f64::from(self.weight) * POUNDS_PER_KILOGRAM) as i32
    }
}

/// Catalog entry describing a single workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(default, deserialize_with = "lenient")]
    id: WorkoutId,

    #[serde(default, deserialize_with = "lenient")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient")]
    pub details: String,

    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub workout_type: WorkoutType,

    #[serde(default, deserialize_with = "lenient")]
    pub difficulty: Difficulty,

    #[serde(default, deserialize_with = "lenient")]
    pub kind: WorkoutKind,
}

impl Default for Workout {
    fn default() -> Self {
        Self::with_id(new_id())
    }
}

impl Workout {
    /// Create a workout with a freshly generated id
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workout with a caller-supplied id
    pub fn with_id(id: impl Into<WorkoutId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            details: String::new(),
            workout_type: WorkoutType::default(),
            difficulty: Difficulty::default(),
            kind: WorkoutKind::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}
