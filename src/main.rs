use clap::{Parser, Subcommand};
use resume_assistant::{
    config::Config,
    create_router,
    utils::{init_file_logger, init_logger},
    AppState, SessionController,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "resume-assistant", version, about = "Ask questions about uploaded nursing resumes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web front-end (default)
    Serve,
    /// Run the terminal front-end
    Tui,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Tui => {
            let config = Config::from_env()?;
            let _guard = init_file_logger(&config.log.dir);
            resume_assistant::tui::run(config).await
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    init_logger();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    info!("Configuration loaded: {:?}", config.server);
    info!("Using model {} at {}", config.llm.model, config.llm.api_base);

    let controller = SessionController::from_config(&config);
    let state = AppState::new(config.clone(), controller);
    let app = create_router(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
