//! Rendering a result template for one concrete type.
//!
//! The template placeholders are `{{I}}` (import line), `{{T}}` (the type)
//! and `{{t}}` (its lowercase name). The rendered file is written to
//! `<output_dir>/<prefix>_<t>/<prefix>_<t><output_ext>`.

use std::fs;
use std::path::{Path, PathBuf};

use monad_core::{Error, Result};
use tracing::{debug, info};

use crate::config::Config;

pub const IMPORT_PLACEHOLDER: &str = "{{I}}";
pub const TYPE_PLACEHOLDER: &str = "{{T}}";
pub const TYPE_ALIAS_PLACEHOLDER: &str = "{{t}}";

/// What the user asked to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub type_name: String,
    pub type_alias: Option<String>,
    pub import: Option<String>,
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

/// Everything needed to run the render chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub input: PathBuf,
    pub package_dir: PathBuf,
    pub output_file: PathBuf,
    pub import: String,
    pub type_name: String,
    pub type_alias: String,
    pub dir_mode: u32,
    pub file_mode: u32,
}

impl RenderRequest {
    /// Resolve names and paths against `config`.
    #[must_use]
    pub fn plan(&self, config: &Config) -> RenderPlan {
        let type_alias = self
            .type_alias
            .clone()
            .unwrap_or_else(|| self.type_name.to_lowercase());
        let package = format!("{}_{type_alias}", config.package_prefix);
        let package_dir = self.output_dir.join(&package);
        let output_file = package_dir.join(format!("{package}{}", config.output_ext));
        let import = self
            .import
            .as_deref()
            .filter(|import| !import.is_empty())
            .map(|import| format!("\"{import}\""))
            .unwrap_or_default();

        RenderPlan {
            input: self.input.clone(),
            package_dir,
            output_file,
            import,
            type_name: self.type_name.clone(),
            type_alias,
            dir_mode: config.dir_mode,
            file_mode: config.file_mode,
        }
    }
}

/// Read, substitute and save; cleanups are left pending on the result.
pub fn render(plan: &RenderPlan) -> Result<String> {
    Result::success(String::new())
        .bind(create_package_dir(&plan.package_dir, plan.dir_mode))
        .bind(read_template(&plan.input))
        .bind(replace(IMPORT_PLACEHOLDER, &plan.import))
        .bind(replace(TYPE_PLACEHOLDER, &plan.type_name))
        .bind(replace(TYPE_ALIAS_PLACEHOLDER, &plan.type_alias))
        .bind(save_to(&plan.output_file, plan.file_mode))
}

fn create_package_dir(dir: &Path, mode: u32) -> impl FnOnce(String) -> Result<String> {
    let dir = dir.to_path_buf();
    move |body| {
        let created = dir_builder(mode)
            .create(&dir)
            .map_err(|e| Error::directory_creation_failed(&dir, e.to_string()));
        if created.is_ok() {
            debug!(dir = %dir.display(), "package directory ready");
        }
        Result::new(body, created.err())
    }
}

fn read_template(input: &Path) -> impl FnOnce(String) -> Result<String> {
    let input = input.to_path_buf();
    move |_| {
        let template = fs::read_to_string(&input)
            .map_err(|e| Error::file_read_failed(&input, e.to_string()));
        if template.is_ok() {
            debug!(input = %input.display(), "template read");
        }
        Result::from(template)
    }
}

/// Replace every occurrence of `target` in the payload with `value`.
pub fn replace(target: &str, value: &str) -> impl FnOnce(String) -> Result<String> {
    let (target, value) = (target.to_string(), value.to_string());
    move |body| Result::success(body.replace(&target, &value))
}

fn save_to(output: &Path, mode: u32) -> impl FnOnce(String) -> Result<String> {
    let output = output.to_path_buf();
    move |body| {
        let saved = write_file(&output, body.as_bytes(), mode)
            .map_err(|e| Error::file_write_failed(&output, e.to_string()));
        if saved.is_ok() {
            info!(output = %output.display(), "template rendered");
        }
        Result::new(body, saved.err())
    }
}

#[cfg(unix)]
fn dir_builder(mode: u32) -> fs::DirBuilder {
    use std::os::unix::fs::DirBuilderExt;

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true).mode(mode);
    builder
}

#[cfg(not(unix))]
fn dir_builder(_mode: u32) -> fs::DirBuilder {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    builder
}

fn write_file(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)?.write_all(contents)
}
