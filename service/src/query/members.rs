//! [`Query`] collection related to the multiple [`Member`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Member, Query};
use crate::read;

use super::SourceQuery;

/// Queries a page of [`Member`]s available within a query window.
pub type List =
    SourceQuery<By<read::member::list::Page, read::member::list::Selector>>;
