//! Kernel of the bookstore service: the [`Module`] contract, the
//! [`ModuleRegistry`] that drives module lifecycles, and layered [`Settings`].

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use settings::Settings;
