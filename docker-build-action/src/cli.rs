use clap::Parser;
use constcat::concat;
use log::debug;

use crate::{
    actions,
    build_args::SKIP_INTEGRATION_TESTS,
    context::CommitContext,
    exec::ProcessExecutor,
    image::{REGISTRY, REPO_PREFIX},
    pipeline::{self, Inputs},
    Result,
};

/// Name of the step output holding the image reference.
pub const IMAGE_OUTPUT: &str = "image";

/// Reads an input the way the runner provides it: surrounding whitespace is ignored and an empty
/// value counts as not provided.
fn input(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Builds the service image, extracts its test reports and coverage, and reports the image as the
/// `image` step output.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(long = "image-name", env = "INPUT_IMAGENAME", help = concat!("Name of the image. Defaults to the repository name with any leading \"", REPO_PREFIX, "\" removed. The image is tagged as ", REGISTRY, "/<owner>/<repository>/<image-name>:git-<sha7>."))]
    pub image_name: Option<String>,

    #[arg(long = "skip-integration-tests", env = "INPUT_SKIPINTEGRATIONTESTS", help = concat!("Passed to the build as the ", SKIP_INTEGRATION_TESTS, " build argument. Only a case-insensitive \"true\" enables it."))]
    pub skip_integration_tests: Option<String>,

    /// Additional build arguments as a JSON object, e.g. `{"NPM_TOKEN":"..."}`.
    #[arg(long = "extra-build-args", env = "INPUT_EXTRABUILDARGS")]
    pub extra_build_args: Option<String>,

    /// The repository that triggered the run, as `owner/name`.
    #[arg(long = "repository", env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// The full sha of the commit that triggered the run.
    #[arg(long = "sha", env = "GITHUB_SHA")]
    pub sha: String,
}

impl Cli {
    pub fn context(&self) -> Result<CommitContext> {
        Ok(CommitContext::new(self.repository.trim(), self.sha.trim())?)
    }

    pub fn inputs(&self) -> Inputs {
        Inputs {
            image_name: input(self.image_name.clone()),
            skip_integration_tests: input(self.skip_integration_tests.clone()),
            extra_build_args: input(self.extra_build_args.clone()),
        }
    }

    pub fn run(self) -> Result<()> {
        let context = self.context()?;
        let inputs = self.inputs();
        debug!("context: {context:?}, inputs: {inputs:?}");

        let image = pipeline::run(&context, &inputs, &mut ProcessExecutor)?;

        actions::set_output(IMAGE_OUTPUT, &image.to_string())?;

        Ok(())
    }
}
