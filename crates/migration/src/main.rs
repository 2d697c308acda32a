use std::error::Error;

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

/// Apply or roll back the Trakli schema outside of the server.
#[derive(Parser, Debug)]
#[command(name = "migration")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./trakli.db?mode=rwc"
    )]
    database_url: String,

    /// Defaults to `up`.
    #[command(subcommand)]
    step: Option<Step>,
}

#[derive(Subcommand, Debug)]
enum Step {
    /// Apply pending migrations.
    Up {
        /// Stop after this many migrations.
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
    /// Roll back applied migrations, the last one by default.
    Down {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },
    /// Drop every table and apply all migrations again.
    Fresh,
    /// Print which migrations are applied.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.step.unwrap_or(Step::Up { count: None }) {
        Step::Up { count } => Migrator::up(&db, count).await?,
        Step::Down { count } => Migrator::down(&db, Some(count)).await?,
        Step::Fresh => Migrator::fresh(&db).await?,
        Step::Status => Migrator::status(&db).await?,
    }
    Ok(())
}
