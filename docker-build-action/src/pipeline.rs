use log::{debug, info};

use crate::{
    build_args::{self, BuildArgs, ExtraBuildArgs},
    context::CommitContext,
    docker,
    exec::Executor,
    image::ImageReference,
    Result,
};

/// Action inputs as provided by the workflow. Empty values should already be mapped to `None`.
#[derive(Debug, Default, Clone)]
pub struct Inputs {
    pub image_name: Option<String>,
    pub skip_integration_tests: Option<String>,
    pub extra_build_args: Option<String>,
}

/// Everything the pipeline needs, resolved before any command is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub image: ImageReference,
    pub build_args: BuildArgs,
}

impl Plan {
    pub fn resolve(context: &CommitContext, inputs: &Inputs) -> Result<Self> {
        let skip_integration_tests =
            build_args::skip_integration_tests(inputs.skip_integration_tests.as_deref());
        let extra = ExtraBuildArgs::parse(inputs.extra_build_args.as_deref())?;
        if !extra.is_empty() {
            debug!("extra build args: {extra:?}");
        }

        Ok(Plan {
            image: ImageReference::resolve(context, inputs.image_name.as_deref()),
            build_args: BuildArgs::new(skip_integration_tests, &extra),
        })
    }
}

/// Builds the image and copies the test reports and coverage into the working directory. Returns
/// the image reference on success.
///
/// A failure after the `test-results` container has been created leaves the container behind.
pub fn run(
    context: &CommitContext,
    inputs: &Inputs,
    executor: &mut dyn Executor,
) -> Result<ImageReference> {
    info!("Starting Docker image build.");

    let Plan { image, build_args } = Plan::resolve(context, inputs)?;
    debug!("image: {image}, build args: {:?}", build_args.pairs());

    executor.execute(docker::build(&image, &build_args))?;

    debug!("Extracting test coverage from Docker image.");
    executor.execute(docker::create(&image))?;

    debug!("Copying the unit test reports");
    executor.execute(docker::copy_out(docker::REPORTS_SOURCE))?;

    debug!("Copying the test coverage reports");
    executor.execute(docker::copy_out(docker::COVERAGE_SOURCE))?;

    debug!("Removing the {} container", docker::CONTAINER_NAME);
    executor.execute(docker::remove())?;

    info!("Build complete.");
    Ok(image)
}
