use clap::Parser;
use tracing::{debug, error, info, warn};
use visionweb::config::{load_env_file, setup_logging};
use visionweb::openai::OpenAiClient;
use visionweb::web::AppState;

#[tokio::main]
async fn main() {
    // before parsing, so OPENAI_API_KEY can come from .env
    let env_file = load_env_file();
    let cli = visionweb::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    match env_file {
        Ok(Some(path)) => info!("Loaded environment from {}", path.display()),
        Ok(None) => debug!("No .env file found"),
        Err(err) => warn!("Failed to load .env file: {}", err),
    }

    let openai = OpenAiClient::new(cli.openai_config());
    let state = AppState::new(cli.input_mode, openai);
    let session_idle = time::Duration::minutes(i64::from(cli.session_idle_minutes));

    if let Err(err) =
        visionweb::web::setup_server(&cli.listen_address, cli.port, state, session_idle).await
    {
        error!("Application error: {}", err);
    }
}
