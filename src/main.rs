use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use workoutrs::config::{AppConfig, Units};
use workoutrs::logging::init_logging;
use workoutrs::{
    Athlete, Difficulty, Gender, RecordStore, Skill, Sport, SqliteKeyValueStore, Vocabulary,
    Workout, WorkoutGenerator, WorkoutKind, WorkoutRsError, WorkoutType,
};

/// workoutrs - Athlete and workout tracker
///
/// Keeps a roster of athletes, a catalog of workouts, and a randomly generated
/// workout plan for every athlete.
#[derive(Parser)]
#[command(name = "workoutrs")]
#[command(version)]
#[command(about = "Athlete and workout tracker", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the database location from the config file
    #[arg(long, value_name = "FILE")]
    database: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage athletes
    #[command(subcommand)]
    Athlete(AthleteCommand),

    /// Browse and extend the workout catalog
    #[command(subcommand)]
    Workout(WorkoutCommand),

    /// List the values of a vocabulary (sport, gender, skill, difficulty, type, kind)
    Vocab {
        /// Vocabulary name
        name: String,
    },
}

#[derive(Subcommand)]
enum AthleteCommand {
    /// List athletes sorted by last name
    List,

    /// Show one athlete and their workout plan
    Show { id: String },

    /// Add an athlete and generate their workout plan
    Add(AthleteFields),

    /// Change an athlete's details (workout plan is kept)
    Edit {
        id: String,

        #[command(flatten)]
        fields: AthleteFields,
    },

    /// Delete an athlete
    Delete { id: String },
}

#[derive(Args)]
struct AthleteFields {
    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    /// Height in centimeters
    #[arg(long)]
    height: Option<i32>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<i32>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    dob: Option<NaiveDate>,

    #[arg(long)]
    sport: Option<Sport>,

    #[arg(long)]
    gender: Option<Gender>,

    #[arg(long)]
    skill: Option<Skill>,
}

impl AthleteFields {
    fn apply_to(self, athlete: &mut Athlete) {
        if let Some(first_name) = self.first_name {
            athlete.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            athlete.last_name = last_name;
        }
        if let Some(height) = self.height {
            athlete.height = height;
        }
        if let Some(weight) = self.weight {
            athlete.weight = weight;
        }
        if let Some(dob) = self.dob {
            athlete.date_of_birth = dob;
        }
        if let Some(sport) = self.sport {
            athlete.sport = sport;
        }
        if let Some(gender) = self.gender {
            athlete.gender = gender;
        }
        if let Some(skill) = self.skill {
            athlete.skill = skill;
        }
    }
}

#[derive(Subcommand)]
enum WorkoutCommand {
    /// List the whole catalog
    List,

    /// Show one workout
    Show { id: String },

    /// Add a workout to the catalog
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        details: String,

        #[arg(long = "type", default_value = "running")]
        workout_type: WorkoutType,

        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,

        #[arg(long, default_value = "main")]
        kind: WorkoutKind,
    },

    /// List workouts of one type or one kind
    Filter {
        #[arg(long = "type", conflicts_with = "kind", required_unless_present = "kind")]
        workout_type: Option<WorkoutType>,

        #[arg(long)]
        kind: Option<WorkoutKind>,
    },
}

#[derive(Tabled)]
struct AthleteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Sport")]
    sport: String,
    #[tabled(rename = "Skill")]
    skill: String,
    #[tabled(rename = "Age")]
    age: i32,
    #[tabled(rename = "Workouts")]
    workouts: usize,
}

#[derive(Tabled)]
struct WorkoutRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    workout_type: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Kind")]
    kind: String,
}

impl From<&Workout> for WorkoutRow {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id().to_string(),
            title: workout.title.clone(),
            workout_type: workout.workout_type.to_string(),
            difficulty: workout.difficulty.to_string(),
            kind: workout.kind.to_string(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };
    config.logging.level = config.logging.level.raised_by(cli.verbose);
    init_logging(&config.logging)?;

    if let Commands::Vocab { name } = &cli.command {
        return print_vocabulary(name);
    }

    let database_path = cli
        .database
        .clone()
        .unwrap_or_else(|| config.storage.database_path.clone());
    let storage = match SqliteKeyValueStore::open(&database_path) {
        Ok(storage) => storage,
        Err(e) => {
            let err = WorkoutRsError::from(e);
            eprintln!("{}", err.user_message().red());
            return Err(err).context("Failed to open database");
        }
    };
    let mut store = RecordStore::open(storage, &config.storage.seed_source());
    let units = config.display.units;

    match cli.command {
        Commands::Athlete(command) => run_athlete_command(&mut store, command, units),
        Commands::Workout(command) => run_workout_command(&mut store, command),
        Commands::Vocab { .. } => Ok(()),
    }
}

fn run_athlete_command(
    store: &mut RecordStore<SqliteKeyValueStore>,
    command: AthleteCommand,
    units: Units,
) -> Result<()> {
    match command {
        AthleteCommand::List => {
            if store.get_athlete_count() == 0 {
                println!("{}", "No athletes yet".dimmed());
                return Ok(());
            }

            let rows: Vec<AthleteRow> = store
                .athletes()
                .iter()
                .map(|athlete| AthleteRow {
                    id: athlete.id().to_string(),
                    name: athlete.full_name(),
                    sport: athlete.sport.to_string(),
                    skill: athlete.skill.to_string(),
                    age: athlete.age(),
                    workouts: athlete.workouts.len(),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }

        AthleteCommand::Show { id } => {
            let (found, athlete) = store.get_athlete_by_id(&id);
            if !found {
                println!("{}", format!("No athlete with id {}", id).yellow());
                return Ok(());
            }
            print_athlete(store, &athlete, units);
        }

        AthleteCommand::Add(fields) => {
            let mut athlete = Athlete::new();
            fields.apply_to(&mut athlete);

            let mut generator = WorkoutGenerator::new();
            let athlete = store.enroll_athlete(athlete, &mut generator);
            println!(
                "{}",
                format!(
                    "✓ Added {} with {} workouts",
                    athlete.full_name(),
                    athlete.workouts.len()
                )
                .green()
            );
            println!("  ID: {}", athlete.id());
        }

        AthleteCommand::Edit { id, fields } => {
            let (found, mut patch) = store.get_athlete_by_id(&id);
            if !found {
                println!("{}", format!("No athlete with id {}", id).yellow());
                return Ok(());
            }
            fields.apply_to(&mut patch);
            store.modify_athlete(&id, &patch);
            println!("{}", format!("✓ Updated {}", patch.full_name()).green());
        }

        AthleteCommand::Delete { id } => {
            let before = store.get_athlete_count();
            store.delete_athlete(&id);
            if store.get_athlete_count() < before {
                println!("{}", "✓ Athlete deleted".green());
            } else {
                println!("{}", format!("No athlete with id {}", id).yellow());
            }
        }
    }

    Ok(())
}

fn print_athlete(store: &RecordStore<SqliteKeyValueStore>, athlete: &Athlete, units: Units) {
    let color = athlete.sport.color();
    println!("{}", athlete.full_name().bold());
    println!("  ID:            {}", athlete.id());
    println!(
        "  Sport:         {}",
        athlete.sport.to_string().truecolor(color.r, color.g, color.b)
    );
    println!("  Gender:        {}", athlete.gender);
    println!("  Skill:         {}", athlete.skill);
    println!("  Date of birth: {}", athlete.date_of_birth_string());
    println!("  Age:           {}", athlete.age());

    match units {
        Units::Metric => {
            println!("  Height:        {} cm", athlete.height);
            println!("  Weight:        {} kg", athlete.weight);
        }
        Units::Imperial => {
            let (feet, inches) = athlete.height_to_imperial();
            println!("  Height:        {} ft {} in", feet, inches);
            println!("  Weight:        {} lb", athlete.weight_to_pounds());
        }
    }

    let plan = store.workouts_for_athlete(athlete);
    println!("\n{}", "Workout plan".bold());
    if plan.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        let rows: Vec<WorkoutRow> = plan.iter().map(WorkoutRow::from).collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
}

fn run_workout_command(
    store: &mut RecordStore<SqliteKeyValueStore>,
    command: WorkoutCommand,
) -> Result<()> {
    match command {
        WorkoutCommand::List => print_workouts(store.workouts()),

        WorkoutCommand::Show { id } => match store.get_workout_by_id(&id) {
            Some(workout) => {
                println!("{}", workout.title.bold());
                println!("  ID:         {}", workout.id());
                println!("  Type:       {}", workout.workout_type);
                println!("  Difficulty: {}", workout.difficulty);
                println!("  Kind:       {}", workout.kind);
                println!("\n{}", workout.details);
            }
            None => println!("{}", format!("No workout with id {}", id).yellow()),
        },

        WorkoutCommand::Add {
            title,
            details,
            workout_type,
            difficulty,
            kind,
        } => {
            let mut workout = Workout::new();
            workout.title = title;
            workout.details = details;
            workout.workout_type = workout_type;
            workout.difficulty = difficulty;
            workout.kind = kind;

            println!("{}", format!("✓ Added workout {}", workout.id()).green());
            store.add_workout(workout);
        }

        WorkoutCommand::Filter { workout_type, kind } => {
            let workouts = match (workout_type, kind) {
                (Some(workout_type), _) => store.get_workouts_by_type(workout_type),
                (None, Some(kind)) => store.get_workouts_by_kind(kind),
                (None, None) => Vec::new(),
            };
            print_workouts(&workouts);
        }
    }

    Ok(())
}

fn print_workouts(workouts: &[Workout]) {
    if workouts.is_empty() {
        println!("{}", "No matching workouts".dimmed());
        return;
    }

    let rows: Vec<WorkoutRow> = workouts.iter().map(WorkoutRow::from).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

fn print_vocabulary(name: &str) -> Result<()> {
    let entries: Vec<(i64, String)> = match name.to_lowercase().as_str() {
        "sport" | "sports" => {
            for sport in Sport::values() {
                let color = sport.color();
                println!(
                    "{:>3}  {}  {}",
                    sport.code(),
                    sport.describe().truecolor(color.r, color.g, color.b),
                    color.hex().dimmed()
                );
            }
            return Ok(());
        }
        "gender" => listing::<Gender>(),
        "skill" => listing::<Skill>(),
        "difficulty" => listing::<Difficulty>(),
        "type" => listing::<WorkoutType>(),
        "kind" => listing::<WorkoutKind>(),
        other => anyhow::bail!("Unknown vocabulary: {}", other),
    };

    for (code, label) in entries {
        println!("{:>3}  {}", code, label);
    }
    Ok(())
}

fn listing<V: Vocabulary>() -> Vec<(i64, String)> {
    V::values()
        .iter()
        .map(|value| (value.code(), value.describe().to_string()))
        .collect()
}
