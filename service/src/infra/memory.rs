//! In-memory [`Source`] implementation.

use std::sync::Arc;

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{member, Member},
    infra::source,
    read,
};
#[cfg(doc)]
use crate::{domain::Window, infra::Source};

/// Team roster kept in memory.
///
/// [`Member`]s are served ordered by their [`member::Name`] and then by their
/// [`member::Id`], so the order is stable between pages of one query.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    /// Ordered [`Member`]s of this [`Roster`].
    members: Arc<[Member]>,
}

impl Roster {
    /// Creates a new [`Roster`] out of the provided [`Member`]s.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = Member>) -> Self {
        let mut members = members.into_iter().collect::<Vec<_>>();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Self {
            members: members.into(),
        }
    }

    /// Returns the number of [`Member`]s in this [`Roster`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Indicates whether this [`Roster`] has no [`Member`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl
    source::Source<
        Select<By<read::member::list::Page, read::member::list::Selector>>,
    > for Roster
{
    type Ok = read::member::list::Page;
    type Err = Traced<source::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::member::list::Page, read::member::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::member::list::Selector {
            arguments,
            filter: read::member::list::Filter { bounds },
        } = by.into_inner();

        let from = match arguments.cursor() {
            None => 0,
            Some(cursor) => self
                .position(*cursor)
                .map(|at| at + 1)
                .ok_or(source::Error::UnknownCursor(*cursor))
                .map_err(tracerr::wrap!())?,
        };
        let to = from.saturating_add(arguments.limit()).min(self.len());

        let edges = self.members[from..to]
            .iter()
            .map(|m| (m.id, m.within(&bounds)))
            .collect::<Vec<_>>();
        log::trace!(
            "served {} of {} members after {:?}",
            edges.len(),
            self.len(),
            arguments.cursor(),
        );

        Ok(read::member::list::Page::new(
            edges,
            to < self.len(),
            self.len().into(),
        ))
    }
}

impl Roster {
    /// Returns the position of a [`Member`] with the provided [`member::Id`].
    fn position(&self, id: member::Id) -> Option<usize> {
        self.members.iter().position(|m| m.id == id)
    }
}
