//! Go snippets inserted into the router and container aggregator files.
//!
//! Fragments carry no outer indentation; the registrar indents them to match
//! the marker line they are placed above.

use dddgen_core::ModuleSpec;

pub const ROUTE_MARKER: &str =
    "// GEN:ROUTE_REGISTER - Code generator appends routes here, do not remove";
pub const SERVICE_FIELD_MARKER: &str =
    "// GEN:SERVICE_REGISTER - Code generator appends services here, do not remove";
pub const SERVICE_INIT_MARKER: &str =
    "// GEN:SERVICE_INIT - Code generator appends initialization here, do not remove";
pub const MODEL_MIGRATE_MARKER: &str =
    "// GEN:MODEL_MIGRATE - Code generator appends models here, do not remove";

/// CRUD route group on the authenticated router, followed by a blank line.
pub fn route(spec: &ModuleSpec) -> String {
    let pascal = &spec.names.pascal_case;
    let camel = &spec.names.camel_case;
    let plural = &spec.names.plural;
    format!(
        "// {pascal} module
{camel}Handler := handler.New{pascal}Handler(c.{pascal}Service)
{plural} := authorized.Group(\"/{plural}\")
{{
\t{plural}.GET(\"\", {camel}Handler.List)
\t{plural}.POST(\"\", {camel}Handler.Create)
\t{plural}.GET(\"/:id\", {camel}Handler.Get)
\t{plural}.PUT(\"/:id\", {camel}Handler.Update)
\t{plural}.DELETE(\"/:id\", {camel}Handler.Delete)
}}

"
    )
}

/// Application service field on the container struct.
pub fn service_field(spec: &ModuleSpec) -> String {
    let pascal = &spec.names.pascal_case;
    format!("{pascal}Service *service.{pascal}AppService\n")
}

/// Repository construction and service wiring inside the container constructor.
pub fn service_init(spec: &ModuleSpec) -> String {
    let pascal = &spec.names.pascal_case;
    let camel = &spec.names.camel_case;
    format!(
        "{camel}Repo := database.New{pascal}Repository(db)\n\
         c.{pascal}Service = service.New{pascal}AppService({camel}Repo)\n"
    )
}

/// Entry in the auto-migration model list.
pub fn migration(spec: &ModuleSpec) -> String {
    format!("&database.{}Model{{}},\n", spec.names.pascal_case)
}
