//! [`Query`] definition.

pub mod members;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{source, Source},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Source`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct SourceQuery<T>(T);

impl<W, B> SourceQuery<By<W, B>> {
    /// Creates a new [`SourceQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Src, W, B> Query<SourceQuery<By<W, B>>> for Service<Src>
where
    Src: Source<Select<By<W, B>>, Ok = W, Err = Traced<source::Error>>,
{
    type Ok = W;
    type Err = Traced<source::Error>;

    async fn execute(
        &self,
        SourceQuery(by): SourceQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.source()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
