//! Bookstore application library
//!
//! Wires the catalog and registration modules into the module kernel and
//! exposes a client for the service's public read endpoints.

pub mod client;
pub mod modules;
pub mod utils;

use anyhow::Context;
use axum::Router;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Build a registry holding every application module.
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings).context("failed to register modules")?;
    Ok(registry)
}

/// Build the complete HTTP application without binding a socket.
pub fn build_app(settings: &Settings) -> anyhow::Result<Router> {
    let registry = build_registry(settings)?;
    Ok(bookstore_http::build_router(&registry, settings))
}

/// Run the service until a shutdown signal arrives.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookstore_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
