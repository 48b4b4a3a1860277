pub mod fragments;
pub mod generator;
pub mod manifest;
pub mod templates;

pub use generator::GinGormGenerator;
pub use manifest::{detect_module_path, resolve_module_path};
