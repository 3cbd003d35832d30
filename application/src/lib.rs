//! Application drives the [`Service`] with a scrolled availability [`Table`].
//!
//! [`Service`]: service::Service

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod args;
pub mod config;
pub mod demo;
pub mod error;
pub mod table;

use tracerr::Traced;
// Used in binary.
use tracing_subscriber as _;

pub use self::{args::Args, config::Config, error::Error, table::Table};

/// Loads [`Config`] from the file pointed by the command line [`Args`].
///
/// # Errors
///
/// Errors if [`Args`] cannot be parsed, or [`Config`] cannot be loaded or
/// describes pages or a viewport nothing can be shown in.
pub fn load() -> Result<Config, Traced<Error>> {
    let Args { config } =
        Args::parse().map_err(tracerr::from_and_wrap!(=> Error))?;
    let config =
        Config::new(config).map_err(tracerr::from_and_wrap!(=> Error))?;
    validate(&config).map_err(tracerr::wrap!())?;
    Ok(config)
}

/// Checks the provided [`Config`] describes a [`Table`] rows can be fetched
/// and shown in.
fn validate(config: &Config) -> Result<(), Error> {
    let Config { pager, log: _, demo } = config;

    if pager.page_size == 0 {
        return Err(Error::EmptyPages);
    }
    if !is_positive(pager.threshold) {
        return Err(Error::UnreachableThreshold);
    }
    if !is_positive(demo.row_height) || !is_positive(demo.viewport_height) {
        return Err(Error::EmptyViewport);
    }
    Ok(())
}

/// Indicates whether the provided `value` is a finite positive number.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
