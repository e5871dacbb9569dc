use anyhow::Result;
use asapi_client::observability::metrics;
use asapi_client::utils::config_loader;
use asapi_client::utils::logging;
use asapi_client::utils::logging::LogLevel;
use asapi_client::AuthorizeHandle;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "ASAPI_CONFIG", default_value = "asapi.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// dump the prometheus registry to stdout after the call
    #[arg(long)]
    print_metrics: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current service token
    Token,
    /// Fetch and print a new service token
    ForceToken,
    /// Verify a user token
    Verify { token: String },
    /// Verify a user token, extended answer
    VerifyV2 { token: String },
    GetUser { uid: String },
    UserCode { uid: String },
    /// Business id and service address of a user within a service
    StaffParam { identify: String, uid: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let client_config = config_loader::run(&args.config).await?;
    logging::run(&client_config, args.log_level)?;

    // -------------------------------
    // 2. Build the client
    // -------------------------------

    let handle = AuthorizeHandle::new(client_config)?;
    info!("client ready for {}", handle.get_config().base_url);

    // -------------------------------
    // 3. Run the command
    // -------------------------------

    let output = run(&handle, args.command).await;

    if args.print_metrics {
        eprintln!("{}", metrics::render().await?);
    }

    match output {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn run(handle: &AuthorizeHandle, command: Command) -> Result<Value, asapi_client::ErrorResult> {
    let value = match command {
        Command::Token => json!({ "access_token": handle.get_token().await? }),
        Command::ForceToken => json!({ "access_token": handle.force_get_token().await? }),
        Command::Verify { token } => {
            let (user_id, client_id) = handle.verify_token(&token).await?;
            json!({ "user_id": user_id, "client_id": client_id })
        }
        Command::VerifyV2 { token } => json!(handle.verify_token_v2(&token).await?),
        Command::GetUser { uid } => json!(handle.get_user(&uid).await?),
        Command::UserCode { uid } => json!({ "user_code": handle.get_user_code(&uid).await? }),
        Command::StaffParam { identify, uid } => {
            let (bu_id, addr) = handle.get_staff_param(&identify, &uid).await?;
            json!({ "bu_id": bu_id, "addr": addr })
        }
    };
    Ok(value)
}
