pub mod config;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod registrar;
pub mod render;
pub mod spec;

pub use error::{ConfigError, NameError, RegisterError, RenderError};
pub use naming::NormalizedName;
pub use pipeline::{GenerationReport, ModuleGenerator, RegistrationOutcome, generate};
pub use registrar::{Insertion, MarkerFile, Registration};
pub use render::{RenderedFile, TemplateFile, TemplateSource};
pub use spec::{ModuleSpec, TemplateContext, validate_name};
