use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use lessonhub::cli::create_user;
use lessonhub::lessonhub_config::DatabaseConfig;
use lessonhub::lessonhub_db::{Database, PgPool, init_db_pool, run_migrations};
use lessonhub::lessonhub_models::UserRole;

#[derive(Parser)]
#[command(name = "lessonhub-cli")]
#[command(about = "LessonHub CLI - Administrative tools for LessonHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin, teacher or student account
    CreateUser {
        /// Role of the account: admin, teacher or student
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateUser {
            role,
            name,
            email,
            password,
        } => handle_create_user(pool, role, name, email, password).await,
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("Migrations applied");
            Ok(())
        }
    }
}

async fn handle_create_user(
    pool: PgPool,
    role: Option<String>,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    // Use provided values or prompt interactively
    let role = match role {
        Some(role) => role.parse::<UserRole>()?,
        None => {
            let labels: Vec<&str> = UserRole::ALL.iter().map(UserRole::as_str).collect();
            let index = Select::new()
                .with_prompt("Role")
                .items(&labels)
                .default(0)
                .interact()?;
            UserRole::ALL[index]
        }
    };

    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let db = Database::postgres(pool);
    let user = create_user(&db, role, &name, &email, &password)
        .await
        .map_err(|e| anyhow!("Error creating user: {}", e.error))?;

    println!("Created {} {} <{}>", user.role, user.name, user.email);
    println!("   ID: {}", user.id);
    Ok(())
}
