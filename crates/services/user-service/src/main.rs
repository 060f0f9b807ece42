//! User Service - command line access to users and friendships.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use domain::NewUser;
use user_service_lib::repository::{UserRepository, UserStore};
use user_service_lib::service::make_get_user;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User and friendship management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// User records
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Friendships between users
    Friends {
        #[command(subcommand)]
        action: FriendCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a user
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        invite_id: i32,
    },
    /// List all users, deleted ones included
    List,
    /// Show an active user with their friend count
    Get { id: Uuid },
    /// Count all users
    Count,
    /// Soft delete a user
    Delete { id: Uuid },
    /// Restore a soft-deleted user
    Restore { id: Uuid },
    /// Permanently remove a user and their friendships
    Purge { id: Uuid },
}

#[derive(Subcommand)]
enum FriendCommands {
    /// List a user's friends
    List { id: Uuid },
    /// Befriend the user owning an invite id
    Add { user_id: Uuid, invite_id: i32 },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_users(action: UserCommands) -> Result<(), Box<dyn std::error::Error>> {
    let db = user_service_lib::connect().await?;
    let repo = UserStore::new(db.get_connection());

    match action {
        UserCommands::Create {
            email,
            name,
            invite_id,
        } => print_json(&repo.create(NewUser::new(email, name, invite_id)).await?),
        UserCommands::List => print_json(&repo.list().await?),
        UserCommands::Get { id } => {
            print_json(&make_get_user(db.get_connection()).execute(id).await?)
        }
        UserCommands::Count => print_json(&repo.user_count().await?),
        UserCommands::Delete { id } => {
            repo.delete_by_id(id).await?;
            print_json(&json!({ "id": id, "status": "deleted" }))
        }
        UserCommands::Restore { id } => {
            repo.restore_by_id(id).await?;
            print_json(&json!({ "id": id, "status": "restored" }))
        }
        UserCommands::Purge { id } => {
            repo.purge_by_id(id).await?;
            print_json(&json!({ "id": id, "status": "purged" }))
        }
    }
}

async fn run_friends(action: FriendCommands) -> Result<(), Box<dyn std::error::Error>> {
    let db = user_service_lib::connect().await?;
    let repo = UserStore::new(db.get_connection());

    match action {
        FriendCommands::List { id } => print_json(&repo.list_user_friends(id).await?),
        FriendCommands::Add { user_id, invite_id } => {
            print_json(&repo.add_friend(user_id, invite_id).await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(migrate_action).await?;
        }
        Commands::Users { action } => run_users(action).await?,
        Commands::Friends { action } => run_friends(action).await?,
    }

    Ok(())
}
