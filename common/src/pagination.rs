//! Abstractions for cursor-chained pagination.

use derive_more::{Display, From, Into};

/// Generic pagination connection.
#[derive(Clone, Debug)]
pub struct Connection<C, I> {
    /// [`Edge`]s in this [`Connection`].
    pub edges: Vec<Edge<C, I>>,

    /// Indicator whether this [`Connection`] has more nodes after its last
    /// [`Edge`].
    pub has_more: bool,

    /// [`TotalCount`] of nodes in the whole paginated sequence.
    pub total_count: TotalCount,
}

/// A page in a [`Connection`].
pub type Page<C, I> = Connection<C, I>;

impl<C, I> Connection<C, I> {
    /// Creates a new [`Connection`] from the provided [`Edge`]s.
    #[must_use]
    pub fn new(
        edges: impl IntoIterator<Item = impl Into<Edge<C, I>>>,
        has_more: bool,
        total_count: TotalCount,
    ) -> Self {
        Self {
            edges: edges.into_iter().map(Into::into).collect::<Vec<_>>(),
            has_more,
            total_count,
        }
    }

    /// Returns [`PageInfo`] of this [`Connection`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo<C>
    where
        C: Clone,
    {
        PageInfo {
            end_cursor: self.edges.last().map(|e| e.cursor.clone()),
            has_next_page: self.has_more,
        }
    }

    /// Returns the cursor to continue pagination from.
    ///
    /// [`None`] is returned if there are no further pages.
    #[must_use]
    pub fn next_cursor(&self) -> Option<C>
    where
        C: Clone,
    {
        let PageInfo {
            end_cursor,
            has_next_page,
        } = self.page_info();
        end_cursor.filter(|_| has_next_page)
    }

    /// Returns the number of [`Edge`]s in this [`Connection`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Indicates whether this [`Connection`] has no [`Edge`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Consumes this [`Connection`] returning its nodes in order.
    pub fn into_nodes(self) -> impl Iterator<Item = I> {
        self.edges.into_iter().map(|e| e.node)
    }
}

/// Information about a page in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct PageInfo<C> {
    /// Last cursor on this page.
    pub end_cursor: Option<C>,

    /// Indicator whether [`Connection`] has a next page.
    pub has_next_page: bool,
}

/// An edge in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct Edge<C, I> {
    /// Cursor of this [`Edge`].
    pub cursor: C,

    /// Node of this [`Edge`].
    pub node: I,
}

impl<C, I> From<(C, I)> for Edge<C, I> {
    fn from((cursor, node): (C, I)) -> Self {
        Self { cursor, node }
    }
}

/// Total count of nodes in a paginated sequence.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct TotalCount(usize);

impl TotalCount {
    /// Returns this [`TotalCount`] as a [`usize`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Forward pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments<C> {
    /// Number of items to return.
    pub first: usize,

    /// Cursor after which to return items.
    pub after: Option<C>,
}

impl<C> Arguments<C> {
    /// Returns cursor requested by this [`Arguments`].
    #[must_use]
    pub fn cursor(&self) -> Option<&C> {
        self.after.as_ref()
    }

    /// Returns limit requested by this [`Arguments`].
    #[must_use]
    pub fn limit(&self) -> usize {
        self.first
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<C, F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments<C>,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($cursor:ty, $node:ty, $filter:ty) => {
        #[doc = "Edge of a [`Connection`]."]
        pub type Edge = $crate::pagination::Edge<$cursor, $node>;

        #[doc = "A [`Connection`] of [`$node`]s."]
        pub type Connection = $crate::pagination::Connection<$cursor, $node>;

        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$cursor, $node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo<$cursor>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments<$cursor>;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$cursor, $filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Connection, TotalCount};

    fn page(ids: &[u32], has_more: bool) -> Connection<u32, String> {
        Connection::new(
            ids.iter().map(|&id| (id, format!("node-{id}"))),
            has_more,
            TotalCount::from(10),
        )
    }

    #[test]
    fn next_cursor_is_last_edge_when_more() {
        assert_eq!(page(&[1, 2, 3], true).next_cursor(), Some(3));
    }

    #[test]
    fn next_cursor_is_absent_on_last_page() {
        assert_eq!(page(&[7, 8], false).next_cursor(), None);
        assert_eq!(page(&[], true).next_cursor(), None);
    }

    #[test]
    fn into_nodes_keeps_order() {
        let nodes = page(&[4, 2, 9], false).into_nodes().collect::<Vec<_>>();

        assert_eq!(nodes, ["node-4", "node-2", "node-9"]);
    }
}
