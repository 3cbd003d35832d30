//! Service contains the logic of paging team members availability.
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

pub mod command;
pub mod domain;
pub mod infra;
pub mod pager;
pub mod query;
pub mod read;

#[cfg(doc)]
use infra::Source;

pub use self::{command::Command, pager::Pager, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`Pager`] configuration.
    pub pager: pager::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Src> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Source`] of this [`Service`].
    source: Src,
}

impl<Src> Service<Src> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, source: Src) -> Self {
        Self { config, source }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Source`] of this [`Service`].
    #[must_use]
    pub fn source(&self) -> &Src {
        &self.source
    }

    /// Creates a new [`Pager`] for the provided [`domain::Window`] configured
    /// by this [`Service`].
    #[must_use]
    pub fn pager<C, I>(&self, window: domain::Window) -> Pager<C, I>
    where
        C: Clone + std::fmt::Debug,
    {
        Pager::new(window, self.config.pager)
    }
}
