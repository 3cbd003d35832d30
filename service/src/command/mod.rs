//! [`Command`] definition.

pub mod fetch_page;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::fetch_page::{FetchPage, Fetched};
