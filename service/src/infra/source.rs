//! [`Source`] of paginated data.

use derive_more::{Display, Error as StdError};

use crate::read::member::list::Cursor;

/// Paginated query operation.
pub use common::Handler as Source;

/// [`Source`] error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Provided cursor doesn't point to any known row.
    #[display("unknown cursor `{_0}`")]
    UnknownCursor(#[error(not(source))] Cursor),

    /// [`Source`] is not able to serve requests at the moment.
    #[display("source is unavailable")]
    Unavailable,
}
