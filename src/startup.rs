use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{config::Config, error::ImportError};

/// Connect to the target database with sqlx query logging off.
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, ImportError> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Ok(db)
}
