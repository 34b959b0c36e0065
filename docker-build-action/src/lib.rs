pub(crate) mod actions;
pub(crate) mod build_args;
pub(crate) mod context;
pub(crate) mod docker;
pub(crate) mod exec;
pub(crate) mod image;
pub(crate) mod pipeline;
pub(crate) mod process;

pub mod cli;

pub use actions::{init_logger, set_failed};

pub(crate) type Result<T, E = Box<dyn std::error::Error + Send + Sync + 'static>> =
    std::result::Result<T, E>;
