mod attachment;
mod cli;
mod dotenv;
mod render;
mod repl;

use std::sync::Arc;

use iris_ai::{ContentAdapter, GeminiConfig, Session};
use iris_common::IrisError;
use iris_config::IrisConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse();

    // Before the runtime exists: this mutates the process environment.
    let dotenv = dotenv::load_dotenv(&dotenv::candidates()).map(|p| p.to_path_buf());

    let loaded = iris_config::load_config(args.config.as_deref());
    let default_directive = loaded
        .as_ref()
        .map(|c| c.logging.level.directive())
        .unwrap_or("iris=info");
    let log_directive = args.log_level.as_deref().unwrap_or(default_directive);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::info!("Iris v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        IrisConfig::default()
    });
    if let Some(model) = args.model {
        config.model.name = model;
    }
    let model = config.model.name.clone();
    tracing::info!("Config loaded (model: {model})");

    if args.print_config {
        println!("{}", iris_config::config_to_json(&config));
        return;
    }

    let gemini = GeminiConfig::from_env(&config.api.key_env).map(|c| {
        c.with_model(model.clone())
            .with_base_url(config.model.base_url.clone())
            .with_max_output_tokens(config.model.max_output_tokens)
            .with_temperature(config.model.temperature)
    });
    let adapter = ContentAdapter::gemini(gemini);
    let configured = adapter.is_configured();
    let session = Arc::new(Session::new(Arc::new(adapter)));

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("iris: failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    let max_image_bytes = u64::from(config.attachments.max_image_bytes);
    let result: Result<(), IrisError> = runtime.block_on(async {
        let mut composer = repl::Composer::new(session, std::io::stdout(), max_image_bytes);
        composer.greet(&model, configured)?;
        composer
            .run(tokio::io::BufReader::new(tokio::io::stdin()))
            .await
    });
    // A pending stdin read would otherwise hold shutdown until the next line.
    runtime.shutdown_background();

    if let Err(e) = result {
        tracing::error!("Composer error: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
