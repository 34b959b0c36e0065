//! The docker invocations issued by the pipeline. Program name, subcommands and argument order are
//! relied upon by downstream tooling and must stay exactly as they are.

use std::ffi::OsStr;

use constcat::concat;

use crate::{build_args::BuildArgs, image::ImageReference, process};

pub const PROGRAM: &str = "docker";

/// Name of the container the reports are copied out of.
pub const CONTAINER_NAME: &str = "test-results";

pub const REPORTS_PATH: &str = "/opt/svc/reports";
pub const COVERAGE_PATH: &str = "/opt/svc/coverage";

pub const REPORTS_SOURCE: &str = concat!(CONTAINER_NAME, ":", REPORTS_PATH);
pub const COVERAGE_SOURCE: &str = concat!(CONTAINER_NAME, ":", COVERAGE_PATH);

/// `docker build --network=host --build-arg ... -t <image> .`
pub fn build(image: &ImageReference, build_args: &BuildArgs) -> process::Command {
    let image = image.to_string();
    process::command!(PROGRAM, "build", "--network=host")
        .args(build_args.to_args().into_iter().map(OsStr::new))
        .args([OsStr::new("-t"), OsStr::new(&image), OsStr::new(".")])
}

/// `docker create --name test-results <image>`
pub fn create(image: &ImageReference) -> process::Command {
    process::command!(PROGRAM, "create", "--name", CONTAINER_NAME, image.to_string())
}

/// `docker cp test-results:<path> .`
pub fn copy_out(source: &str) -> process::Command {
    process::command!(PROGRAM, "cp", source, ".")
}

/// `docker rm test-results`
pub fn remove() -> process::Command {
    process::command!(PROGRAM, "rm", CONTAINER_NAME)
}
