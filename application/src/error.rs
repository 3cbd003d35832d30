//! [`Error`]-related definitions.

use config::ConfigError;
use derive_more::{Display, Error as StdError, From};

#[cfg(doc)]
use crate::{Args, Config};

/// Error of starting the application.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to parse [`Args`].
    #[display("failed to parse command line arguments: {_0}")]
    Args(clap::Error),

    /// Failed to load [`Config`].
    #[display("failed to load `Config`: {_0}")]
    Config(ConfigError),

    /// [`Config`] requests empty pages.
    #[display("`pager.page_size` must be positive")]
    #[from(ignore)]
    EmptyPages,

    /// [`Config`] describes a threshold no scroll position can reach.
    #[display("`pager.threshold` must be a positive number")]
    #[from(ignore)]
    UnreachableThreshold,

    /// [`Config`] describes a viewport rows cannot be laid out in.
    #[display("`demo.row_height` and `demo.viewport_height` must be positive")]
    #[from(ignore)]
    EmptyViewport,
}
