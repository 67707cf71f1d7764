mod config;
mod demo;
mod metrics;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use metrix_api::{HttpApi, MetricsServer};
use metrix_core::Registry;
use metrix_observe::init_logger;
use metrix_prometheus::TextEncoder;

use crate::{config::AgentConfig, metrics::AgentMetrics};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) config + logger
    let cfg = AgentConfig::from_env()?;
    init_logger(&cfg.logger)?;
    info!(addr = %cfg.socket_addr(), demo = cfg.demo, "agent starting");

    // 2) registry; any registration error aborts startup
    let registry = Arc::new(Registry::new());
    let metrics = AgentMetrics::register(&registry)?;
    info!(families = registry.len(), "metrics registered");

    // 3) bind before anything else runs, so a taken port exits non-zero
    let server = MetricsServer::bind(cfg.socket_addr()).await?;

    // 4) optional synthetic workload
    let token = CancellationToken::new();
    let demo = cfg.demo.then(|| {
        tokio::spawn(demo::run(
            metrics.http_requests.clone(),
            demo::DEMO_INTERVAL,
            token.child_token(),
        ))
    });

    // 5) serve until signalled
    let router = HttpApi::new(Arc::clone(&registry))
        .with_encoder(TextEncoder::new().with_created_samples(cfg.created_samples))
        .with_scrape_counter(metrics.scrapes.clone())
        .router();
    info!(
        "metrics available at http://{}{}",
        server.local_addr(),
        metrix_api::METRICS_PATH
    );
    server.serve(router, shutdown_signal(token.clone())).await?;

    token.cancel();
    if let Some(handle) = demo {
        if let Err(e) = handle.await {
            warn!(error = %e, "demo workload ended abnormally");
        }
    }
    info!("agent stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM and cancels `token`.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
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
                warn!(error = %e, "failed to listen for SIGTERM");
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

    info!("shutdown requested");
    token.cancel();
}
