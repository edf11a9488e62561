use clap::{Parser, Subcommand};
use clothes_catalog::api::user_management::accounts::create_superuser;
use clothes_catalog::db::{establish_connection, run_migrations};
use clothes_catalog::error::CatalogError;
use clothes_catalog::settings::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clothes-catalog", about = "REST backend for cataloguing clothing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default)
    Serve,
    /// Create a staff account with every permission
    CreateSuperuser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::new().map_err(CatalogError::from)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let _ = clothes_catalog::rocket(settings).launch().await?;
        }
        Command::CreateSuperuser { email, password } => {
            let mut conn =
                establish_connection(&settings.database_url).map_err(CatalogError::from)?;
            let applied = run_migrations(&mut conn)?;
            info!(applied, "database migrations complete");

            let user = create_superuser(&mut conn, &email, &password)?;
            info!(user_id = user.id, email = %user.email, "superuser created");
        }
    }

    Ok(())
}
