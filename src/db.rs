use diesel::pg::PgConnection;
use diesel::{Connection, ConnectionResult};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use rocket::{fairing, Build, Rocket};
use rocket_sync_db_pools::database;
use tracing::{error, info};

#[database("clothes_catalog")]
pub struct DbConn(PgConnection);

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Opens a connection outside of Rocket, for command-line tooling.
pub fn establish_connection(database_url: &str) -> ConnectionResult<PgConnection> {
    PgConnection::establish(database_url)
}

/// Applies any pending migrations, returning how many ran.
pub fn run_migrations(conn: &mut PgConnection) -> Result<usize, String> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| applied.len())
        .map_err(|err| err.to_string())
}

pub(crate) async fn run_db_migrations(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match DbConn::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            error!("no database connection available for migrations");
            return Err(rocket);
        }
    };

    match conn.run(run_migrations).await {
        Ok(applied) => {
            info!(applied, "database migrations complete");
            Ok(rocket)
        }
        Err(err) => {
            error!(%err, "couldn't run database migrations");
            Err(rocket)
        }
    }
}
