use std::path::PathBuf;

use dddgen_core::config::{DEFAULT_CONTAINER_FILE, DEFAULT_ROUTER_FILE};
use dddgen_core::{
    Insertion, ModuleGenerator, ModuleSpec, Registration, TemplateFile, TemplateSource,
};

use crate::fragments;
use crate::templates;

/// Scaffolds a DDD module for a gin + gorm service.
pub struct GinGormGenerator {
    templates: TemplateSource,
    router_file: PathBuf,
    container_file: PathBuf,
}

impl Default for GinGormGenerator {
    fn default() -> Self {
        Self {
            templates: templates::embedded(),
            router_file: PathBuf::from(DEFAULT_ROUTER_FILE),
            container_file: PathBuf::from(DEFAULT_CONTAINER_FILE),
        }
    }
}

impl GinGormGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use templates from somewhere other than the embedded set.
    pub fn with_templates(mut self, templates: TemplateSource) -> Self {
        self.templates = templates;
        self
    }

    /// Point at different router and container files (relative to the project root).
    pub fn with_aggregators(
        mut self,
        router_file: impl Into<PathBuf>,
        container_file: impl Into<PathBuf>,
    ) -> Self {
        self.router_file = router_file.into();
        self.container_file = container_file.into();
        self
    }
}

impl ModuleGenerator for GinGormGenerator {
    fn templates(&self) -> &TemplateSource {
        &self.templates
    }

    fn files(&self, spec: &ModuleSpec) -> Vec<TemplateFile> {
        let snake = &spec.names.snake_case;
        let file = |template: &'static str, target: String| TemplateFile {
            template,
            target: PathBuf::from(target),
        };
        vec![
            file(
                templates::DOMAIN_ENTITY,
                format!("internal/domain/{snake}/entity.go"),
            ),
            file(
                templates::DOMAIN_REPOSITORY,
                format!("internal/domain/{snake}/repository.go"),
            ),
            file(
                templates::INFRA_MODEL,
                format!("internal/infrastructure/persistence/database/{snake}_model.go"),
            ),
            file(
                templates::INFRA_REPO,
                format!("internal/infrastructure/persistence/database/{snake}_repo.go"),
            ),
            file(
                templates::APP_DTO,
                format!("internal/application/dto/{snake}_dto.go"),
            ),
            file(
                templates::APP_SERVICE,
                format!("internal/application/service/{snake}_service.go"),
            ),
            file(
                templates::HANDLER,
                format!("internal/interfaces/http/handler/{snake}_handler.go"),
            ),
        ]
    }

    fn registrations(&self, spec: &ModuleSpec) -> Vec<Registration> {
        let insert = |marker: &str, fragment: String| Insertion {
            marker: marker.to_string(),
            fragment,
        };
        vec![
            Registration {
                label: "route".to_string(),
                path: self.router_file.clone(),
                insertions: vec![insert(fragments::ROUTE_MARKER, fragments::route(spec))],
            },
            Registration {
                label: "service".to_string(),
                path: self.container_file.clone(),
                insertions: vec![
                    insert(
                        fragments::SERVICE_FIELD_MARKER,
                        fragments::service_field(spec),
                    ),
                    insert(fragments::SERVICE_INIT_MARKER, fragments::service_init(spec)),
                ],
            },
            Registration {
                label: "migration".to_string(),
                path: self.container_file.clone(),
                insertions: vec![insert(
                    fragments::MODEL_MIGRATE_MARKER,
                    fragments::migration(spec),
                )],
            },
        ]
    }
}
