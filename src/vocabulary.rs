//! Closed vocabularies used by athletes and workouts
//!
//! Every vocabulary is a dense set of values indexed `0..N`, stored on disk as its integer
//! code. Unknown codes never fail a decode: they collapse to the vocabulary's fallback value
//! so records written by older builds stay loadable.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Common behaviour of the enumerated domain vocabularies
pub trait Vocabulary: Sized + Copy + PartialEq + 'static {
    /// Name used in log messages and CLI help
    const NAME: &'static str;

    /// Value substituted for unrecognized codes
    const FALLBACK: Self;

    /// All values in code order
    fn values() -> &'static [Self];

    /// Display label
    fn describe(self) -> &'static str;

    /// Stable integer code
    fn code(self) -> i64;

    /// Number of values in the vocabulary
    fn count() -> usize {
        Self::values().len()
    }

    /// Decode an integer code, `None` when out of range
    fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::values().get(index).copied())
    }

    /// Decode an integer code, substituting the fallback value when out of range
    fn from_code_or_default(code: i64) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            warn!(
                vocabulary = Self::NAME,
                code,
                fallback = Self::FALLBACK.describe(),
                "Unknown vocabulary code, using fallback"
            );
            Self::FALLBACK
        })
    }

    /// Parse a label (case-insensitive) or a numeric code
    fn parse_label(input: &str) -> Option<Self> {
        let needle = input.trim();
        if let Ok(code) = needle.parse::<i64>() {
            return Self::from_code(code);
        }

        let normalized = normalize_label(needle);
        Self::values()
            .iter()
            .copied()
            .find(|value| normalize_label(value.describe()) == normalized)
    }
}

// "Warm-Up", "warm up" and "warmup" all name the same value.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Wires integer-code serde, `Display` and code conversions onto a vocabulary enum.
macro_rules! vocabulary_glue {
    ($ty:ident) => {
        impl From<i64> for $ty {
            fn from(code: i64) -> Self {
                <$ty as Vocabulary>::from_code_or_default(code)
            }
        }

        impl From<$ty> for i64 {
            fn from(value: $ty) -> Self {
                value.code()
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                <$ty as Vocabulary>::FALLBACK
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.describe())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Vocabulary>::parse_label(s)
                    .ok_or_else(|| format!("Invalid {}: {}", <$ty as Vocabulary>::NAME, s))
            }
        }
    };
}

/// Primary sport of an athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Sport {
    None = 0,
    Football = 1,
    Soccer = 2,
    Baseball = 3,
    Basketball = 4,
    Volleyball = 5,
    Cycling = 6,
    CrossCountry = 7,
    Running = 8,
    Triathlon = 9,
    Swimming = 10,
    Golf = 11,
    Cricket = 12,
    Rugby = 13,
    Wrestling = 14,
    AutoRacing = 15,
}

impl Vocabulary for Sport {
    const NAME: &'static str = "sport";
    const FALLBACK: Self = Sport::None;

    fn values() -> &'static [Self] {
        &[
            Sport::None,
            Sport::Football,
            Sport::Soccer,
            Sport::Baseball,
            Sport::Basketball,
            Sport::Volleyball,
            Sport::Cycling,
            Sport::CrossCountry,
            Sport::Running,
            Sport::Triathlon,
            Sport::Swimming,
            Sport::Golf,
            Sport::Cricket,
            Sport::Rugby,
            Sport::Wrestling,
            Sport::AutoRacing,
        ]
    }

    fn describe(self) -> &'static str {
        match self {
            Sport::None => "None",
            Sport::Football => "Football",
            Sport::Soccer => "Soccer",
            Sport::Baseball => "Baseball",
            Sport::Basketball => "Basketball",
            Sport::Volleyball => "Volleyball",
            Sport::Cycling => "Cycling",
            Sport::CrossCountry => "Cross Country",
            Sport::Running => "Running",
            Sport::Triathlon => "Triathlon",
            Sport::Swimming => "Swimming",
            Sport::Golf => "Golf",
            Sport::Cricket => "Cricket",
            Sport::Rugby => "Rugby",
            Sport::Wrestling => "Wrestling",
            Sport::AutoRacing => "Auto Racing",
        }
    }

    fn code(self) -> i64 {
        self as i64
    }
}

impl Sport {
    /// Display color associated with the sport
    pub fn color(self) -> Rgb {
        match self {
            Sport::None => Rgb::BLACK,
            Sport::Football => Rgb::BLUE,
            Sport::Soccer => Rgb::BROWN,
            Sport::Baseball => Rgb::RED,
            Sport::Basketball => Rgb::CYAN,
            Sport::Volleyball => Rgb::DARK_GRAY,
            Sport::Cycling => Rgb::GRAY,
            Sport::CrossCountry => Rgb::GREEN,
            Sport::Running => Rgb::LIGHT_GRAY,
            Sport::Triathlon => Rgb::MAGENTA,
            Sport::Swimming => Rgb::ORANGE,
            Sport::Golf => Rgb::PURPLE,
            Sport::Cricket => Rgb::from_hex("#BDB76B"),
            Sport::Rugby => Rgb::from_hex("#F5DEB3"),
            Sport::Wrestling => Rgb::from_hex("#8B0000"),
            Sport::AutoRacing => Rgb::from_hex("#ADD8E6"),
        }
    }
}

vocabulary_glue!(Sport);

/// Declared gender of an athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Gender {
    Male = 0,
    Female = 1,
    NonBinary = 2,
    Unknown = 3,
}

impl Vocabulary for Gender {
    const NAME: &'static str = "gender";
    const FALLBACK: Self = Gender::Unknown;

    fn values() -> &'static [Self] {
        &[Gender::Male, Gender::Female, Gender::NonBinary, Gender::Unknown]
    }

    fn describe(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-binary (Third Gender)",
            Gender::Unknown => "Not Declared",
        }
    }

    fn code(self) -> i64 {
        self as i64
    }
}

vocabulary_glue!(Gender);

/// Skill level of an athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Skill {
    Novice = 0,
    Intermediate = 1,
    Advanced = 2,
    Expert = 3,
}

impl Vocabulary for Skill {
    const NAME: &'static str = "skill";
    const FALLBACK: Self = Skill::Novice;

    fn values() -> &'static [Self] {
        &[Skill::Novice, Skill::Intermediate, Skill::Advanced, Skill::Expert]
    }

    fn describe(self) -> &'static str {
        match self {
            Skill::Novice => "Novice",
            Skill::Intermediate => "Intermediate",
            Skill::Advanced => "Advanced",
            Skill::Expert => "Expert",
        }
    }

    fn code(self) -> i64 {
        self as i64
    }
}

vocabulary_glue!(Skill);

/// Workout difficulty, ordered by increasing intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Difficulty {
    Easy = 0,
    Medium = 1,
    Hard = 2,
    Professional = 3,
}

impl Vocabulary for Difficulty {
    const NAME: &'static str = "difficulty";
    const FALLBACK: Self = Difficulty::Easy;

    fn values() -> &'static [Self] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Professional,
        ]
    }

    fn describe(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Professional => "Professional",
        }
    }

    fn code(self) -> i64 {
        self as i64
    }
}

vocabulary_glue!(Difficulty);

/// Role of a workout within a training session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum WorkoutKind {
    Any = 0,
    WarmUp = 1,
    Main = 2,
    CoolDown = 3,
}

impl Vocabulary for WorkoutKind {
    const NAME: &'static str = "kind";
    const FALLBACK: Self = WorkoutKind::Main;

    fn values() -> &'static [Self] {
        &[
            WorkoutKind::Any,
            WorkoutKind::WarmUp,
            WorkoutKind::Main,
            WorkoutKind::CoolDown,
        ]
    }

    fn describe(self) -> &'static str {
        match self {
            WorkoutKind::Any => "Any",
            WorkoutKind::WarmUp => "Warm-Up",
            WorkoutKind::Main => "Main",
            WorkoutKind::CoolDown => "Cool Down",
        }
    }

    fn code(self) -> i64 {
        self as i64
    }
}

vocabulary_glue!(WorkoutKind);

/// Training modality of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum WorkoutType {
    Running = 0,
    Swimming = 1,
    Cycling = 2,
    WeightLifting = 3,
    Strength = 4,
    Cardio = 5,
}

impl Vocabulary for WorkoutType {
    const NAME: &'static str = "type";
    const FALLBACK: Self = WorkoutType::Running;

    fn values() -> &'static [Self] {
        &[
            WorkoutType::Running,
            WorkoutType::Swimming,
            WorkoutType::Cycling,
            WorkoutType::WeightLifting,
            WorkoutType::Strength,
            WorkoutType::Cardio,
        ]
    }

    fn describe(self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Swimming => "Swimming",
            WorkoutType::Cycling => "Cycling",
            WorkoutType::WeightLifting => "Weight Lifting",
            WorkoutType::Strength => "Strength Training",
            WorkoutType::Cardio => "Cardio",
        }
    }

    fn code(self) -> i64 {
        self as i64
    }
}

vocabulary_glue!(WorkoutType);

/// 8-bit RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const BROWN: Rgb = Rgb::new(153, 102, 51);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const DARK_GRAY: Rgb = Rgb::new(85, 85, 85);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const LIGHT_GRAY: Rgb = Rgb::new(170, 170, 170);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const ORANGE: Rgb = Rgb::new(255, 128, 0);
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional). Malformed input yields gray.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Rgb::GRAY;
        }

        match u32::from_str_radix(digits, 16) {
            Ok(value) => Rgb::new(
                ((value >> 16) & 0xFF) as u8,
                ((value >> 8) & 0xFF) as u8,
                (value & 0xFF) as u8,
            ),
            Err(_) => Rgb::GRAY,
        }
    }

    /// Render as `#RRGGBB`
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_vocabulary_total<V: Vocabulary + std::fmt::Debug>() {
        let values = V::values();
        assert_eq!(V::count(), values.len());
        for (index, value) in values.iter().enumerate() {
            assert!(!value.describe().is_empty());
            assert_eq!(value.code(), index as i64);
            assert_eq!(V::from_code(index as i64), Some(*value));
        }
        assert_eq!(V::from_code(values.len() as i64), None);
        assert_eq!(V::from_code(-1), None);
    }

    #[test]
    fn test_vocabularies_are_total_and_dense() {
        assert_vocabulary_total::<Sport>();
        assert_vocabulary_total::<Gender>();
        assert_vocabulary_total::<Skill>();
        assert_vocabulary_total::<Difficulty>();
        assert_vocabulary_total::<WorkoutKind>();
        assert_vocabulary_total::<WorkoutType>();
    }

    #[test]
    fn test_vocabulary_counts() {
        assert_eq!(Sport::count(), 16);
        assert_eq!(Gender::count(), 4);
        assert_eq!(Skill::count(), 4);
        assert_eq!(Difficulty::count(), 4);
        assert_eq!(WorkoutKind::count(), 4);
        assert_eq!(WorkoutType::count(), 6);
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        assert_eq!(Gender::from_code_or_default(42), Gender::Unknown);
        assert_eq!(Skill::from_code_or_default(-3), Skill::Novice);
        assert_eq!(Difficulty::from_code_or_default(4), Difficulty::Easy);
        assert_eq!(WorkoutType::from_code_or_default(6), WorkoutType::Running);
        assert_eq!(WorkoutKind::from_code_or_default(99), WorkoutKind::Main);
        assert_eq!(Sport::from_code_or_default(16), Sport::None);
    }

    #[test]
    fn test_serializes_as_integer_code() {
        assert_eq!(serde_json::to_string(&Sport::Soccer).unwrap(), "2");
        assert_eq!(serde_json::to_string(&WorkoutKind::CoolDown).unwrap(), "3");

        let difficulty: Difficulty = serde_json::from_str("2").unwrap();
        assert_eq!(difficulty, Difficulty::Hard);

        let gender: Gender = serde_json::from_str("17").unwrap();
        assert_eq!(gender, Gender::Unknown);
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(WorkoutKind::parse_label("warm up"), Some(WorkoutKind::WarmUp));
        assert_eq!(WorkoutKind::parse_label("Warm-Up"), Some(WorkoutKind::WarmUp));
        assert_eq!(Sport::parse_label("cross country"), Some(Sport::CrossCountry));
        assert_eq!(Sport::parse_label("15"), Some(Sport::AutoRacing));
        assert_eq!(Skill::parse_label("grandmaster"), None);
        assert_eq!("weight lifting".parse::<WorkoutType>(), Ok(WorkoutType::WeightLifting));
        assert!("hockey".parse::<Sport>().is_err());
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Hard < Difficulty::Professional);
    }

    #[test]
    fn test_sport_colors_are_distinct() {
        let colors: HashSet<Rgb> = Sport::values().iter().map(|s| s.color()).collect();
        assert_eq!(colors.len(), Sport::count());
        assert_eq!(Sport::Wrestling.color().hex(), "#8B0000");
        assert_eq!(Sport::None.color(), Rgb::BLACK);
    }

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#F5DEB3"), Rgb::new(0xF5, 0xDE, 0xB3));
        assert_eq!(Rgb::from_hex("adD8e6"), Rgb::new(0xAD, 0xD8, 0xE6));
        assert_eq!(Rgb::from_hex("#12345"), Rgb::GRAY);
        assert_eq!(Rgb::from_hex("#GGGGGG"), Rgb::GRAY);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Gender::NonBinary.to_string(), "Non-binary (Third Gender)");
        assert_eq!(WorkoutType::Strength.to_string(), "Strength Training");
    }
}
