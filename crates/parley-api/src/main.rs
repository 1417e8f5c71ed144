//! Parley entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, loads configuration, initializes logging and the
//! database, then serves the HTTP API or runs a maintenance command.

mod cli;

use std::net::SocketAddr;

use clap::Parser;
use clap_complete::generate;

use parley_api::http::router::build_router;
use parley_api::state::AppState;
use parley_infra::config::{load_config, resolve_database_url};
use parley_observe::tracing_setup::{LogFormat, init_tracing, shutdown_tracing};
use parley_types::config::AppConfig;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config, logging or storage
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "parley", &mut std::io::stdout());
        return Ok(());
    }

    let (mut config, config_error) = match load_config(&cli.config).await {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    match &cli.command {
        Commands::Serve(args) => args.apply(&mut config),
        Commands::Migrate(args) => args.apply(&mut config),
        Commands::Completions { .. } => {}
    }

    init_tracing(
        cli.log_filter(),
        LogFormat::from_json_flag(config.logging.json),
        config.logging.otel,
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    if let Some(err) = config_error {
        tracing::warn!("{err}, using defaults");
    }

    let result = run(&cli, &config).await;
    shutdown_tracing();
    result
}

async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let database_url = resolve_database_url(config);
    let state = AppState::init(&database_url, &config.storage).await?;

    match &cli.command {
        Commands::Serve(_) => {
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(addr = %listener.local_addr()?, "starting parley");

            let router = build_router(state.clone(), &config.server);
            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown_signal())
            .await?;

            state.db_pool.close().await;
            tracing::info!("server stopped");
        }
        Commands::Migrate(_) => {
            state.db_pool.close().await;
            tracing::info!(url = %database_url, "migrations applied");
        }
        Commands::Completions { .. } => unreachable!("handled before startup"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
