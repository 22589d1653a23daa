//! Horizons backend - a mock AI content-generation API.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use horizons_backend::{
    config::Config,
    generation::GenerationService,
    server::{create_router, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    print_banner();

    let service = GenerationService::new(config.delay_profile())
        .with_cdn_base_url(config.cdn_base_url.as_str())
        .with_avatar_cdn_base_url(config.avatar_cdn_base_url.as_str());
    let delays = service.delays();

    info!("Configuration:");
    info!("  Generation delay: {:?}", delays.generation);
    info!("  Avatar delay: {:?}", delays.avatar);
    info!("  Long video job time: {:?}", delays.long_video);
    info!("  Content CDN: {}", config.cdn_base_url);
    info!("  Avatar CDN: {}", config.avatar_cdn_base_url);
    info!(
        "  Max upload size: {}MB",
        config.max_upload_bytes / (1024 * 1024)
    );
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    let router = create_router(service, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/", addr);
    info!(
        "    curl -H 'Content-Type: application/json' -d '{{\"prompt\":\"a fox\"}}' http://{}/api/generate/image",
        addr
    );
    info!("    curl -F 'file=@photo.png' http://{}/api/upload", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Print the startup banner.
fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    info!("");
    info!("██╗  ██╗ ██████╗ ██████╗ ██╗███████╗ ██████╗ ███╗   ██╗███████╗");
    info!("██║  ██║██╔═══██╗██╔══██╗██║╚══███╔╝██╔═══██╗████╗  ██║██╔════╝");
    info!("███████║██║   ██║██████╔╝██║  ███╔╝ ██║   ██║██╔██╗ ██║███████╗");
    info!("██╔══██║██║   ██║██╔══██╗██║ ███╔╝  ██║   ██║██║╚██╗██║╚════██║");
    info!("██║  ██║╚██████╔╝██║  ██║██║███████╗╚██████╔╝██║ ╚████║███████║");
    info!("╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚═╝╚══════╝ ╚═════╝ ╚═╝  ╚═══╝╚══════╝");
    info!("");
    info!("                     mock backend v{}", version);
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "horizons_backend=debug,tower_http=debug"
    } else {
        "horizons_backend=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let router_config = RouterConfig::new()
        .with_max_upload_bytes(config.max_upload_bytes)
        .with_tracing(!config.no_tracing);

    match config.cors_origins {
        Some(ref origins) => router_config.with_cors_origins(origins.clone()),
        None => router_config.with_cors_any_origin(),
    }
}
