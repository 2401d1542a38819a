pub mod books;
pub mod users;

use std::sync::Arc;

use bookstore_kernel::{settings::Settings, ModuleRegistry};

use books::catalog::Catalog;
use users::store::UserStore;

/// Register all project-specific modules with the registry
///
/// Each module gets its own freshly built store, so two registries never
/// share state.
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let catalog = Arc::new(Catalog::load(&settings.catalog)?);
    registry.register(books::create_module(catalog))?;

    registry.register(users::create_module(
        Arc::new(UserStore::new()),
        settings.registration.legacy_status_codes,
    ))?;

    Ok(())
}
