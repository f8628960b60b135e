//! Installing a template from a remote repository.
//!
//! The output file is opened first and closed by a deferred cleanup; the
//! download runs as an inner chain whose response body is closed when that
//! inner chain resolves, before the outer chain goes on.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use monad_core::functional::boxed;
use monad_core::{Error, Result};
use reqwest::StatusCode;
use reqwest::blocking::Response;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::handle::Handle;

/// Where a template comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub url: String,
    pub output_file: PathBuf,
}

impl InstallPlan {
    /// `<root_url><version>/<monad>/<monad><ext>`, saved as `<monad><ext>`
    /// inside `output_dir`.
    #[must_use]
    pub fn new(config: &Config, monad: &str, version: &str, output_dir: &Path) -> Self {
        let file_name = format!("{monad}{}", config.template_ext);
        Self {
            url: format!("{}{version}/{monad}/{file_name}", config.root_url),
            output_file: output_dir.join(file_name),
        }
    }
}

/// Download the template into the output file.
///
/// The returned result still holds the output file's close as a pending
/// cleanup; resolve it to release the file.
pub fn install(plan: &InstallPlan) -> Result<Handle<File>> {
    open_output_file(&plan.output_file).chain([
        boxed(write_template_to_file_from(plan.url.clone())),
        boxed(print_success),
    ])
}

fn open_output_file(path: &Path) -> Result<Handle<File>> {
    let opened = File::create(path)
        .map(|file| Handle::new("output file", file))
        .map_err(|e| Error::file_write_failed(path, e.to_string()));

    Result::from(opened).defer(close_output_file)
}

fn close_output_file(out: Handle<File>) {
    if let Err(e) = out.close().map_or(Ok(()), |file| file.sync_all()) {
        warn!(error = %e, "failed to flush output file");
    }
}

fn print_success(out: Handle<File>) -> Result<Handle<File>> {
    println!("Successfully installed template.");
    Result::success(out)
}

fn write_template_to_file_from(url: String) -> impl FnOnce(Handle<File>) -> Result<Handle<File>> {
    move |out| {
        let fetched = fetch_template(&url)
            .chain([
                boxed(validate_response(url.clone())),
                boxed(copy_body_to(out.clone())),
            ])
            .resolve();

        Result::new(out, fetched.err())
    }
}

fn fetch_template(url: &str) -> Result<Handle<Response>> {
    debug!(url, "fetching template");
    let fetched = reqwest::blocking::get(url)
        .map(|response| Handle::new("response body", response))
        .map_err(|e| Error::request_failed(url, e.to_string()));

    Result::from(fetched).defer(close_response_body)
}

fn close_response_body(response: Handle<Response>) {
    drop(response.close());
}

fn validate_response(url: String) -> impl FnOnce(Handle<Response>) -> Result<Handle<Response>> {
    move |response| {
        let checked = response
            .with_mut(|r| r.status())
            .and_then(|status| check_status(&url, status));

        Result::new(response, checked.err())
    }
}

/// Only `200 OK` counts as a downloadable template.
///
/// # Errors
///
/// Returns `Error::UnexpectedStatus` for any other status.
pub fn check_status(url: &str, status: StatusCode) -> std::result::Result<(), Error> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(Error::unexpected_status(url, status.to_string()))
    }
}

/// Copy everything readable from the payload into `out`.
pub fn copy_body_to<R, W>(out: Handle<W>) -> impl FnOnce(Handle<R>) -> Result<Handle<R>>
where
    R: Read,
    W: Write,
{
    move |source| {
        let copied = source
            .with_mut(|body| out.with_mut(|sink| std::io::copy(body, sink)))
            .and_then(|inner| inner)
            .and_then(|io| io.map_err(|e| Error::file_write_failed(out.name(), e.to_string())));

        if let Ok(bytes) = copied {
            info!(bytes, "template body copied");
        }
        Result::new(source, copied.err())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_plan_builds_url_and_file_name() {
        let plan = InstallPlan::new(&Config::default(), "result", "v1.2.1", Path::new("out"));

        assert_eq!(
            plan.url,
            "https://github.com/nanoservice/monad.go/raw/v1.2.1/result/result.go.t"
        );
        assert_eq!(plan.output_file, PathBuf::from("out/result.go.t"));
    }

    #[test]
    fn test_check_status_accepts_ok_only() {
        assert!(check_status("u", StatusCode::OK).is_ok());
        assert_eq!(
            check_status("u", StatusCode::NOT_FOUND),
            Err(Error::unexpected_status("u", "404 Not Found"))
        );
    }

    #[test]
    fn test_copy_body_to_sink() {
        let sink = Handle::new("sink", Vec::<u8>::new());
        let source = Handle::new("source", Cursor::new(b"template body".to_vec()));

        let result = copy_body_to(sink.clone())(source);

        assert!(result.is_success());
        assert_eq!(sink.close(), Some(b"template body".to_vec()));
    }

    #[test]
    fn test_copy_into_closed_sink_fails() {
        let sink = Handle::new("sink", Vec::<u8>::new());
        drop(sink.close());
        let source = Handle::new("source", Cursor::new(Vec::<u8>::new()));

        let result = copy_body_to(sink)(source);

        assert_eq!(result.failure_value(), Some(&Error::handle_closed("sink")));
    }
}
