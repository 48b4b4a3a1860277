use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::RenderError;

/// Where template text comes from.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Templates compiled into the binary, keyed by template name.
    Embedded(IndexMap<&'static str, &'static str>),
    /// A directory holding one file per template name.
    Directory(PathBuf),
}

impl TemplateSource {
    /// Fetch the raw text of a template.
    pub fn load(&self, template: &str) -> Result<Cow<'_, str>, RenderError> {
        match self {
            Self::Embedded(templates) => templates
                .get(template)
                .map(|text| Cow::Borrowed(*text))
                .ok_or_else(|| RenderError::TemplateRead {
                    template: template.to_string(),
                    path: PathBuf::from(template),
                    source: io::Error::new(io::ErrorKind::NotFound, "no embedded template"),
                }),
            Self::Directory(dir) => {
                let path = dir.join(template);
                fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| RenderError::TemplateRead {
                        template: template.to_string(),
                        path,
                        source,
                    })
            }
        }
    }
}

/// One (template, target path) pair. `target` is relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub template: &'static str,
    pub target: PathBuf,
}

/// A fully rendered file, held in memory until every template has succeeded.
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Render a single template against `ctx`.
///
/// Undefined placeholders are an error rather than an empty string, so a
/// misspelled field in an override template fails loudly.
pub fn render_template<S: Serialize>(
    source: &TemplateSource,
    template: &str,
    ctx: S,
) -> Result<String, RenderError> {
    let text = source.load(template)?;

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(template, &text)
        .map_err(|source| RenderError::TemplateSyntax {
            template: template.to_string(),
            source,
        })?;
    let tmpl = env
        .get_template(template)
        .map_err(|source| RenderError::TemplateSyntax {
            template: template.to_string(),
            source,
        })?;

    tmpl.render(ctx).map_err(|source| RenderError::TemplateRender {
        template: template.to_string(),
        source,
    })
}

/// Render every file in memory, refusing to proceed if any target exists.
///
/// Nothing touches the disk here, so a conflict or a broken template leaves
/// the project exactly as it was.
pub fn render_files<S: Serialize + Copy>(
    source: &TemplateSource,
    files: &[TemplateFile],
    ctx: S,
    root: &Path,
) -> Result<Vec<RenderedFile>, RenderError> {
    if let Some(existing) = files.iter().find(|f| root.join(&f.target).exists()) {
        return Err(RenderError::AlreadyExists {
            path: existing.target.clone(),
        });
    }

    files
        .iter()
        .map(|file| {
            let content = render_template(source, file.template, ctx)?;
            log::debug!("rendered {} -> {}", file.template, file.target.display());
            Ok(RenderedFile {
                path: file.target.clone(),
                content,
            })
        })
        .collect()
}

/// Write rendered files under `root` in order, stopping at the first failure.
///
/// Files written before the failure stay on disk and are listed in
/// [`RenderError::Write`].
pub fn write_files(root: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>, RenderError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        if let Err(mut err) = write_new_file(root, file) {
            if let RenderError::Write { written: done, .. } = &mut err {
                *done = written;
            }
            return Err(err);
        }
        log::debug!("wrote {}", file.path.display());
        written.push(file.path.clone());
    }
    Ok(written)
}

fn write_new_file(root: &Path, file: &RenderedFile) -> Result<(), RenderError> {
    let write_error = |source: io::Error| RenderError::Write {
        path: file.path.clone(),
        written: Vec::new(),
        source,
    };
    let path = root.join(&file.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let mut out = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => RenderError::AlreadyExists {
                path: file.path.clone(),
            },
            _ => write_error(source),
        })?;
    fill_new_file(&path, &mut out, file.content.as_bytes()).map_err(write_error)
}

/// Write `content` to a freshly created file, removing it again on failure so
/// a truncated file can't block the next run.
fn fill_new_file<W: Write>(path: &Path, out: &mut W, content: &[u8]) -> io::Result<()> {
    let result = out.write_all(content).and_then(|()| out.flush());
    if result.is_err() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("could not remove partial file {}: {e}", path.display());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded(pairs: &[(&'static str, &'static str)]) -> TemplateSource {
        TemplateSource::Embedded(pairs.iter().copied().collect())
    }

    #[derive(Clone, Copy, Serialize)]
    struct Ctx<'a> {
        pascal_name: &'a str,
    }

    const CTX: Ctx<'static> = Ctx {
        pascal_name: "Order",
    };

    #[test]
    fn test_render_substitutes_fields() {
        let source = embedded(&[("t.j2", "type {{ pascal_name }} struct{}\n")]);
        let out = render_template(&source, "t.j2", CTX).unwrap();
        assert_eq!(out, "type Order struct{}\n");
    }

    #[test]
    fn test_missing_embedded_template() {
        let source = embedded(&[]);
        let err = render_template(&source, "nope.j2", CTX).unwrap_err();
        assert!(matches!(err, RenderError::TemplateRead { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let source = embedded(&[("t.j2", "{% if %}")]);
        let err = render_template(&source, "t.j2", CTX).unwrap_err();
        assert!(matches!(err, RenderError::TemplateSyntax { .. }));
    }

    #[test]
    fn test_undefined_placeholder_fails() {
        let source = embedded(&[("t.j2", "{{ pascl_name }}")]);
        let err = render_template(&source, "t.j2", CTX).unwrap_err();
        assert!(matches!(err, RenderError::TemplateRender { .. }));
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("t.j2"), "{{ pascal_name }}Model").unwrap();
        let source = TemplateSource::Directory(dir.path().to_path_buf());
        assert_eq!(render_template(&source, "t.j2", CTX).unwrap(), "OrderModel");

        let err = render_template(&source, "missing.j2", CTX).unwrap_err();
        match err {
            RenderError::TemplateRead { path, .. } => {
                assert_eq!(path, dir.path().join("missing.j2"));
            }
            other => panic!("expected TemplateRead, got {other:?}"),
        }
    }

    #[test]
    fn test_render_files_rejects_existing_target() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("b")).unwrap();
        fs::write(root.path().join("b/two.go"), "hand written").unwrap();

        let source = embedded(&[("t.j2", "x")]);
        let files = vec![
            TemplateFile {
                template: "t.j2",
                target: PathBuf::from("a/one.go"),
            },
            TemplateFile {
                template: "t.j2",
                target: PathBuf::from("b/two.go"),
            },
        ];
        let err = render_files(&source, &files, CTX, root.path()).unwrap_err();
        match err {
            RenderError::AlreadyExists { path } => assert_eq!(path, PathBuf::from("b/two.go")),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert!(!root.path().join("a").exists());
    }

    #[test]
    fn test_write_files_creates_parents() {
        let root = tempfile::tempdir().unwrap();
        let files = vec![RenderedFile {
            path: PathBuf::from("deep/nested/file.go"),
            content: "package nested\n".to_string(),
        }];
        let written = write_files(root.path(), &files).unwrap();
        assert_eq!(written, vec![PathBuf::from("deep/nested/file.go")]);
        let content = fs::read_to_string(root.path().join("deep/nested/file.go")).unwrap();
        assert_eq!(content, "package nested\n");
    }

    #[test]
    fn test_write_files_never_overwrites() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("main.go"), "keep me").unwrap();
        let files = vec![RenderedFile {
            path: PathBuf::from("main.go"),
            content: "replaced".to_string(),
        }];
        let err = write_files(root.path(), &files).unwrap_err();
        assert!(matches!(err, RenderError::AlreadyExists { .. }));
        assert_eq!(
            fs::read_to_string(root.path().join("main.go")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_write_failure_keeps_earlier_files() {
        let root = tempfile::tempdir().unwrap();
        // A plain file where a directory is needed makes the second write fail.
        fs::write(root.path().join("blocked"), "").unwrap();
        let files = vec![
            RenderedFile {
                path: PathBuf::from("ok/first.go"),
                content: "first".to_string(),
            },
            RenderedFile {
                path: PathBuf::from("blocked/second.go"),
                content: "second".to_string(),
            },
            RenderedFile {
                path: PathBuf::from("ok/third.go"),
                content: "third".to_string(),
            },
        ];
        let err = write_files(root.path(), &files).unwrap_err();
        match err {
            RenderError::Write { path, written, .. } => {
                assert_eq!(path, PathBuf::from("blocked/second.go"));
                assert_eq!(written, vec![PathBuf::from("ok/first.go")]);
            }
            other => panic!("expected Write, got {other:?}"),
        }
        assert!(root.path().join("ok/first.go").exists());
        assert!(!root.path().join("ok/third.go").exists());
    }

    /// Accepts a few bytes, then fails like a full disk.
    struct FullDisk {
        room: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.room == 0 {
                return Err(io::Error::other("no space left on device"));
            }
            let n = buf.len().min(self.room);
            self.room -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("entity.go");
        fs::write(&path, "pack").unwrap();

        let err = fill_new_file(&path, &mut FullDisk { room: 4 }, b"package order\n").unwrap_err();
        assert_eq!(err.to_string(), "no space left on device");
        assert!(!path.exists());
    }

    #[test]
    fn test_successful_fill_keeps_file() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("entity.go");
        let mut out = fs::File::create(&path).unwrap();
        fill_new_file(&path, &mut out, b"package order\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "package order\n");
    }
}
