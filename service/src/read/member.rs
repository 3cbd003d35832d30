//! [`Member`] read model definition.
//!
//! [`Member`]: crate::domain::Member

pub mod list {
    //! [`Member`]s list definitions.

    use common::define_pagination;

    use crate::domain::{member, window, Member};
    #[cfg(doc)]
    use crate::domain::Window;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = Member;

    /// Cursor pointing to a specific [`Member`] in a list.
    pub type Cursor = member::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug)]
    pub struct Filter {
        /// [`Window`] bounds to show [`Member`]s availability within.
        pub bounds: window::Bounds,
    }

    /// Total count of [`Member`]s.
    pub use common::pagination::TotalCount;
}
