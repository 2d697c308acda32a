use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, EngineError};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "trakli_admin")]
#[command(about = "Admin utilities for Trakli (bootstrap users and API tokens)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./trakli.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user and print its API token.
    Create(UsernameArgs),
    /// Issue a new API token, revoking the previous one.
    Token(UsernameArgs),
}

#[derive(Args, Debug)]
struct UsernameArgs {
    #[arg(long)]
    username: String,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => match engine.create_user(&args.username).await {
            Ok(user) => {
                println!("created user: {}", user.username);
                println!("token: {}", user.token);
            }
            Err(EngineError::ExistingKey(_)) => {
                eprintln!("user already exists: {}", args.username);
                std::process::exit(1);
            }
            Err(err) => return Err(err.into()),
        },
        Command::User(User {
            command: UserCommand::Token(args),
        }) => match engine.rotate_user_token(&args.username).await {
            Ok(user) => println!("token: {}", user.token),
            Err(EngineError::KeyNotFound(_)) => {
                eprintln!("user not found: {}", args.username);
                std::process::exit(1);
            }
            Err(err) => return Err(err.into()),
        },
    }

    Ok(())
}
