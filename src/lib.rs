//! Shelf application library
//!
//! [`modules::books`] is the book collection service mounted at `/api/books`;
//! [`console`] is the library console that lists, creates, edits and deletes
//! books through that service.

pub mod console;
pub mod modules;

use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build the registry with every project module registered.
pub fn registry() -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry)?;
    Ok(registry)
}

/// Run the collection service until ctrl-c.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let registry = registry()?;
    let ctx = InitCtx { settings };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = shelf_http::start_server(&registry, settings, shutdown_signal()).await;

    registry
        .stop_all()
        .await
        .context("failed to stop modules")?;
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c; shutting down");
    }
    tracing::info!("shutdown signal received");
}
