use dddgen_core::TemplateSource;
use indexmap::IndexMap;

pub const DOMAIN_ENTITY: &str = "domain_entity.go.j2";
pub const DOMAIN_REPOSITORY: &str = "domain_repository.go.j2";
pub const INFRA_MODEL: &str = "infra_model.go.j2";
pub const INFRA_REPO: &str = "infra_repo.go.j2";
pub const APP_DTO: &str = "app_dto.go.j2";
pub const APP_SERVICE: &str = "app_service.go.j2";
pub const HANDLER: &str = "handler.go.j2";

/// The built-in templates, in the order their files are written.
pub fn embedded() -> TemplateSource {
    let templates: IndexMap<&'static str, &'static str> = [
        (DOMAIN_ENTITY, include_str!("../templates/domain_entity.go.j2")),
        (
            DOMAIN_REPOSITORY,
            include_str!("../templates/domain_repository.go.j2"),
        ),
        (INFRA_MODEL, include_str!("../templates/infra_model.go.j2")),
        (INFRA_REPO, include_str!("../templates/infra_repo.go.j2")),
        (APP_DTO, include_str!("../templates/app_dto.go.j2")),
        (APP_SERVICE, include_str!("../templates/app_service.go.j2")),
        (HANDLER, include_str!("../templates/handler.go.j2")),
    ]
    .into_iter()
    .collect();
    TemplateSource::Embedded(templates)
}
