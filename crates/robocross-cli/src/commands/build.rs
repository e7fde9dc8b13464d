use clap::Args;
use robocross_core::storage::RoutineDefaults;
use robocross_core::{Config, Equipment, Routine, RoutineBuilder, RoutineParams, WorkoutType};

/// Build parameters. Anything left out falls back to the `[routine]`
/// section of the config file.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Seconds per exercise
    #[arg(long)]
    pub interval: Option<u32>,
    /// Workout length in minutes
    #[arg(long)]
    pub length: Option<u32>,
    /// Minimum rest after each exercise, in seconds
    #[arg(long)]
    pub rest: Option<u32>,
    /// Workout type: cardio, strength, cardio_strength, random or test
    #[arg(long = "type")]
    pub workout_type: Option<WorkoutType>,
    /// Exercise names to leave out (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
    /// Equipment you don't have (comma separated, e.g. mat,jump_rope)
    #[arg(long, value_delimiter = ',')]
    pub no_equipment: Option<Vec<Equipment>>,
    /// Seed for a reproducible routine
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print the routine as JSON
    #[arg(long)]
    pub json: bool,
}

impl BuildArgs {
    pub fn params(&self, defaults: &RoutineDefaults) -> RoutineParams {
        let mut params = defaults.to_params();
        if let Some(interval) = self.interval {
            params.interval_secs = interval;
        }
        if let Some(length) = self.length {
            params.workout_length_min = length;
        }
        if let Some(rest) = self.rest {
            params.minimum_rest_secs = rest;
        }
        if let Some(workout_type) = self.workout_type {
            params.workout_type = workout_type;
        }
        if let Some(names) = &self.exclude {
            params.excluded_names = names.iter().cloned().collect();
        }
        if let Some(equipment) = &self.no_equipment {
            params.excluded_equipment = equipment.iter().copied().collect();
        }
        params
    }
}

/// Build a routine from the args and config, turning build failures into
/// their user-facing message.
pub fn build_routine(args: &BuildArgs, config: &Config) -> Result<Routine, Box<dyn std::error::Error>> {
    let catalog = super::load_catalog(config)?;
    let params = args.params(&config.routine);
    RoutineBuilder::new(&catalog, &config.builder)
        .build(&params, args.seed)
        .map_err(|e| e.user_message().into())
}

pub fn print_summary(routine: &Routine) {
    let params = routine.params();
    println!(
        "{} workout: {} exercises, {}",
        params.workout_type,
        routine.exercise_count(),
        routine.total_duration_nice()
    );
    println!(
        "{}s per exercise, {}s rest",
        params.interval_secs,
        routine.actual_rest_secs()
    );
    println!("{}", routine.workout_report());
}

pub fn run(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let routine = build_routine(&args, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&routine)?);
    } else {
        print_summary(&routine);
    }
    Ok(())
}
