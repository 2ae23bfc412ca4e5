//! Kernel primitives shared by every Shelf crate: the [`Module`] trait, the
//! [`ModuleRegistry`] that drives module lifecycles, and layered [`settings`].

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
