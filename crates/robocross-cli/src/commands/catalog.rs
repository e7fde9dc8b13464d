use clap::Subcommand;
use robocross_core::Config;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all exercises
    List {
        /// Print the catalog in its JSON data-file format
        #[arg(long)]
        json: bool,
    },
    /// Show one exercise as JSON
    Show {
        /// Exercise name (case-insensitive)
        name: String,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let catalog = super::load_catalog(&config)?;

    match action {
        CatalogAction::List { json: true } => {
            println!("{}", catalog.to_json()?);
        }
        CatalogAction::List { json: false } => {
            for exercise in catalog.exercises() {
                let equipment: Vec<&str> = exercise.equipment.iter().map(|e| e.tag()).collect();
                println!(
                    "{:<36} {:<9} {:<7} {}",
                    exercise.name,
                    format!("{:?}", exercise.aerobic_type).to_lowercase(),
                    format!("{:?}", exercise.intensity).to_lowercase(),
                    equipment.join(",")
                );
            }
        }
        CatalogAction::Show { name } => {
            let exercise = catalog.get(&name)?;
            println!("{}", serde_json::to_string_pretty(exercise)?);
        }
    }
    Ok(())
}
