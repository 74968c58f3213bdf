use clap::Subcommand;
use serde_json::{json, Value};

use crate::auth::{Identity, TokenService};
use crate::cli::{utils, OutputFormat};
use crate::config::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a token for an identity object")]
    Issue {
        #[arg(help = "Identity claims as JSON, e.g. '{\"email\":\"seller@example.com\"}'")]
        claims: String,
    },

    #[command(about = "Verify a token and print its identity")]
    Verify {
        #[arg(help = "Token to verify")]
        token: String,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let tokens = TokenService::from_config(&config().security)?;

    match cmd {
        TokenCommands::Issue { claims } => {
            let claims: Value = serde_json::from_str(&claims)?;
            let identity = Identity::try_from(claims)?;
            let token = tokens.issue(&identity)?;

            match output_format {
                OutputFormat::Json => utils::output_success(&output_format, "Token issued", Some(json!({ "token": token }))),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
        TokenCommands::Verify { token } => match tokens.verify(&token) {
            Ok(identity) => {
                let data = json!({ "identity": identity });
                match output_format {
                    OutputFormat::Json => utils::output_success(&output_format, "Token is valid", Some(data)),
                    OutputFormat::Text => {
                        println!("{}", serde_json::to_string_pretty(&identity)?);
                        Ok(())
                    }
                }
            }
            Err(e) => {
                utils::output_error(&output_format, &e.to_string(), Some("INVALID_TOKEN"))?;
                anyhow::bail!("token verification failed")
            }
        },
    }
}
