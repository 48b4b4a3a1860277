use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use clap_complete::Shell;

use dddgen_core::config::{self, CONFIG_FILE_NAME, DddGenConfig};
use dddgen_core::{GenerationReport, ModuleSpec, RenderError, TemplateSource, generate};
use dddgen_gin::{GinGormGenerator, resolve_module_path};

/// Long flags that may be spelled with a single dash, Go `flag` style.
const SINGLE_DASH_FLAGS: &[&str] = &["name", "cn", "module"];

const USAGE: &str = "usage: dddgen -name order -cn Order";

#[derive(Parser)]
#[command(
    name = "dddgen",
    about = "Scaffold a DDD module (entity, repository, service, handler) into a gin/gorm project",
    version
)]
struct Cli {
    /// Module name (lowercase, e.g. order)
    #[arg(long)]
    name: Option<String>,

    /// Display name used in generated comments (defaults to the module name)
    #[arg(long = "cn", value_name = "DISPLAY_NAME")]
    display_name: Option<String>,

    /// Go module path (detected from go.mod when omitted)
    #[arg(long = "module", value_name = "MODULE_PATH")]
    module_path: Option<String>,

    /// Project root the module is generated into
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Directory with template overrides
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Config file (defaults to .dddgen.yaml in the project root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the generation report as JSON
    #[arg(long)]
    json: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse_from(normalize_flags(std::env::args_os()));

    if let Some(shell) = cli.completions {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, "dddgen", &mut std::io::stdout());
        return Ok(());
    }

    cmd_generate(cli)
}

/// Rewrite `-name`, `-cn` and `-module` (optionally with `=value`) to their
/// double-dash forms so clap accepts them. Arguments that aren't valid UTF-8
/// pass through untouched and are left for clap to reject.
fn normalize_flags<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let single_dash = arg
                .to_str()
                .and_then(|arg| arg.strip_prefix('-'))
                .filter(|rest| !rest.starts_with('-'))
                .map(|rest| rest.split('=').next().unwrap_or(rest))
                .is_some_and(|flag| SINGLE_DASH_FLAGS.contains(&flag));
            if single_dash {
                let mut long = OsString::from("-");
                long.push(&arg);
                long
            } else {
                arg
            }
        })
        .collect()
}

/// Load the project config, preferring an explicit `--config` path.
fn load_config(root: &Path, explicit: Option<&Path>) -> Result<DddGenConfig> {
    let path = explicit.map_or_else(|| root.join(CONFIG_FILE_NAME), Path::to_path_buf);
    let cfg = config::load_config(&path)?;
    if cfg.is_none() && explicit.is_some() {
        anyhow::bail!("config file {} does not exist", path.display());
    }
    Ok(cfg.unwrap_or_default())
}

fn cmd_generate(cli: Cli) -> Result<()> {
    let name = match cli.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => anyhow::bail!("-name is required\n{USAGE}"),
    };

    let cfg = load_config(&cli.root, cli.config.as_deref())?;
    let module_path = match cli.module_path {
        Some(path) => path,
        None => resolve_module_path(&cli.root.join(&cfg.manifest), &cfg.default_module_path),
    };
    let spec = ModuleSpec::try_new(name, cli.display_name.as_deref(), module_path)
        .map_err(|err| anyhow::anyhow!("invalid -name: {err}\n{USAGE}"))?;

    let mut generator =
        GinGormGenerator::new().with_aggregators(&cfg.router_file, &cfg.container_file);
    if let Some(dir) = cli.templates.or_else(|| cfg.templates.map(|t| cli.root.join(t))) {
        log::debug!("using templates from {}", dir.display());
        generator = generator.with_templates(TemplateSource::Directory(dir));
    }

    if !cli.json {
        println!(
            "Generating DDD module: {} ({})",
            spec.names.pascal_case, spec.display_name
        );
    }

    let report = generate(&generator, &spec, &cli.root)
        .inspect_err(print_partial_writes)
        .with_context(|| format!("failed to generate module {}", spec.names.pascal_case))?;

    print_warnings(&report);
    if cli.json {
        let summary = build_summary(&spec, &report);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&spec, &report);
    }
    Ok(())
}

/// List the files a failed run already wrote. They are not rolled back.
fn print_partial_writes(err: &RenderError) {
    if let RenderError::Write { written, .. } = err {
        for path in written {
            eprintln!("  + {} (left in place)", path.display());
        }
    }
}

fn print_warnings(report: &GenerationReport) {
    for outcome in &report.registrations {
        for err in &outcome.errors {
            eprintln!(
                "  ! failed to register {}: {} (please add manually)",
                outcome.label, err
            );
        }
    }
}

fn print_report(spec: &ModuleSpec, report: &GenerationReport) {
    for path in &report.created {
        println!("  + {}", path.display());
    }
    for outcome in report.registrations.iter().filter(|o| o.is_ok()) {
        println!(
            "  + {} registered in {}",
            outcome.label,
            outcome.path.display()
        );
    }

    let snake = &spec.names.snake_case;
    println!("\nModule {} generated!", spec.names.pascal_case);
    println!("\nNext steps:");
    println!("  1. Edit internal/domain/{snake}/entity.go - add domain fields and business methods");
    println!(
        "  2. Edit internal/application/service/{snake}_service.go - implement business orchestration"
    );
    println!("  3. Run make docs - update Swagger documentation");
}

fn build_summary(spec: &ModuleSpec, report: &GenerationReport) -> serde_json::Value {
    let registrations: Vec<serde_json::Value> = report
        .registrations
        .iter()
        .map(|outcome| {
            serde_json::json!({
                "step": outcome.label,
                "path": outcome.path,
                "ok": outcome.is_ok(),
                "warnings": outcome.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "module": {
            "name": spec.name,
            "display_name": spec.display_name,
            "module_path": spec.module_path,
            "names": spec.names,
        },
        "created": report.created,
        "registrations": registrations,
    })
}
