//! MongoDB connection bootstrap.

use bson::doc;
use mongodb::{Client, Database};

/// Database used when neither the config nor the URI names one.
pub const DEFAULT_DATABASE: &str = "rivals";

/// Connect to MongoDB and select the database holding the `villains`
/// collection.
///
/// `database` wins over the URI's default database; if neither is set,
/// [`DEFAULT_DATABASE`] is used.
pub async fn connect(uri: &str, database: Option<&str>) -> Result<Database, mongodb::error::Error> {
    tracing::debug!("setting up mongo client");
    let client = Client::with_uri_str(uri).await?;

    let database = match database {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    };
    Ok(database)
}

/// Ping the server through the selected database.
pub async fn health_check(database: &Database) -> Result<(), mongodb::error::Error> {
    database.run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
}
