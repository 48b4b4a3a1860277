use std::path::{Path, PathBuf};

use crate::error::{RegisterError, RenderError};
use crate::registrar::Registration;
use crate::render::{self, TemplateFile, TemplateSource};
use crate::spec::ModuleSpec;

/// A target stack that knows which files make up a module and where to
/// register them.
pub trait ModuleGenerator {
    /// Template text for every name returned by [`ModuleGenerator::files`].
    fn templates(&self) -> &TemplateSource;

    /// The fixed (template, target path) pairs for a module, in write order.
    fn files(&self, spec: &ModuleSpec) -> Vec<TemplateFile>;

    /// Aggregator edits that wire the module into the project, in order.
    fn registrations(&self, spec: &ModuleSpec) -> Vec<Registration>;
}

/// How one registration step went.
#[derive(Debug)]
pub struct RegistrationOutcome {
    pub label: String,
    pub path: PathBuf,
    pub errors: Vec<RegisterError>,
}

impl RegistrationOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Summary of a generation run.
#[derive(Debug)]
pub struct GenerationReport {
    /// Created files, relative to the project root.
    pub created: Vec<PathBuf>,
    pub registrations: Vec<RegistrationOutcome>,
}

impl GenerationReport {
    /// True when every registration step succeeded.
    pub fn is_clean(&self) -> bool {
        self.registrations.iter().all(RegistrationOutcome::is_ok)
    }
}

/// Scaffold one module under `root`.
///
/// Rendering is all-or-nothing up to the first write: an existing target or a
/// broken template aborts before anything is created. Registration steps run
/// only after every file is written, and their failures are collected in the
/// report instead of aborting.
pub fn generate(
    generator: &dyn ModuleGenerator,
    spec: &ModuleSpec,
    root: &Path,
) -> Result<GenerationReport, RenderError> {
    let files = generator.files(spec);
    let rendered = render::render_files(generator.templates(), &files, spec.context(), root)?;
    let created = render::write_files(root, &rendered)?;
    log::info!(
        "wrote {} files for module {}",
        created.len(),
        spec.names.pascal_case
    );

    let registrations = generator
        .registrations(spec)
        .into_iter()
        .map(|registration| {
            let errors = registration.apply(root);
            RegistrationOutcome {
                label: registration.label,
                path: registration.path,
                errors,
            }
        })
        .collect::<Vec<_>>();
    log::info!(
        "{} of {} registration steps succeeded",
        registrations.iter().filter(|r| r.is_ok()).count(),
        registrations.len()
    );

    Ok(GenerationReport {
        created,
        registrations,
    })
}
