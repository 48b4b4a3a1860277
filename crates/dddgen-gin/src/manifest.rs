use std::fs;
use std::path::Path;

/// Read the `module <path>` declaration from a `go.mod` file.
///
/// Returns `None` if the file can't be read or has no such line.
pub fn detect_module_path(manifest: &Path) -> Option<String> {
    let content = fs::read_to_string(manifest).ok()?;
    content
        .lines()
        .find_map(|line| line.strip_prefix("module "))
        .map(|path| path.trim().to_string())
}

/// Module path from the manifest, or `fallback` when it can't be detected.
pub fn resolve_module_path(manifest: &Path, fallback: &str) -> String {
    match detect_module_path(manifest) {
        Some(path) => {
            log::debug!("detected module path {path} from {}", manifest.display());
            path
        }
        None => {
            log::debug!(
                "no module declaration in {}, using {fallback}",
                manifest.display()
            );
            fallback.to_string()
        }
    }
}
