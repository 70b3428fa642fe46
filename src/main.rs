use anyhow::Context;
use clap::Parser;
use dinner_picker::app::reply::render_reply;
use dinner_picker::utils::error::ErrorSeverity;
use dinner_picker::utils::{logger, validation::Validate};
use dinner_picker::{
    AppConfig, CliArgs, CliCommand, ConsoleTransport, CsvFoodCatalog, DinnerEngine,
    JsonFileRequestHistory,
};
use std::sync::Arc;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.config_path().and_then(AppConfig::from_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    logger::init_logger(config.env, args.verbose);
    tracing::debug!("Start application with config: {:?}", config);

    let catalog = Arc::new(CsvFoodCatalog::new(&config.storage.catalog_path));
    tracing::info!("Food catalog: {}", catalog.path().display());
    let history = Arc::new(
        JsonFileRequestHistory::open(&config.storage.history_path, config.quota.policy())
            .await
            .context("failed to open request history")?,
    );
    let engine = DinnerEngine::new(catalog, history);

    match args.command {
        CliCommand::Recommend { user_id } => {
            let result = engine.recommend(user_id).await;
            println!("{}", render_reply(&result, &config.reply.conjunction));

            if let Err(e) = result {
                let exit_code = match e.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                if exit_code > 0 {
                    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                    std::process::exit(exit_code);
                }
            }
        }
        CliCommand::Serve => {
            let transport = ConsoleTransport::new(engine, config.reply.conjunction.clone());
            let stdin = BufReader::new(tokio::io::stdin());

            tokio::select! {
                served = transport.run(stdin, tokio::io::stdout()) => {
                    let replies = served.context("console transport failed")?;
                    tracing::info!("input closed after {} replies", replies);
                }
                signal = shutdown_signal() => {
                    tracing::warn!("application stopped, signal: {}", signal);
                }
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
