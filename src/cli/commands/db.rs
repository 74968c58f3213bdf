use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::config::config;
use crate::database::{DocumentStore, MongoStore};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Connect with the configured URI and ping the server")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Ping => {
            let database = &config().database;
            let store = MongoStore::connect(database).await?;

            let outcome = store.health_check().await;
            store.close().await?;

            match outcome {
                Ok(()) => utils::output_success(
                    &output_format,
                    &format!("Database '{}' is reachable", database.name),
                    Some(json!({ "database": database.name })),
                ),
                Err(e) => {
                    utils::output_error(&output_format, &e.to_string(), Some("DATABASE_UNREACHABLE"))?;
                    anyhow::bail!("database ping failed")
                }
            }
        }
    }
}
