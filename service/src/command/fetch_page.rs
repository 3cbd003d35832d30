//! [`Command`] for fetching a page of [`Member`]s requested by a [`Pager`].

use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::{domain::Member, pager::Pager};
use crate::{
    infra::source,
    pager::{Request, Ticket},
    query::{self, Query},
    read, Service,
};

use super::Command;

/// [`Command`] for fetching a page of [`Member`]s requested by a [`Pager`].
#[derive(Clone, Debug, From)]
pub struct FetchPage(pub Request<read::member::list::Cursor>);

/// Page fetched by the [`FetchPage`] [`Command`].
#[derive(Clone, Debug)]
pub struct Fetched {
    /// [`Ticket`] of the [`Request`] this page answers.
    pub ticket: Ticket,

    /// Fetched page.
    pub page: read::member::list::Page,
}

impl<Src> Command<FetchPage> for Service<Src>
where
    Self: Query<
        query::members::List,
        Ok = read::member::list::Page,
        Err = Traced<source::Error>,
    >,
{
    type Ok = Fetched;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        FetchPage(request): FetchPage,
    ) -> Result<Self::Ok, Self::Err> {
        let Request {
            ticket,
            arguments,
            bounds,
        } = request;

        let query = query::members::List::by(read::member::list::Selector {
            arguments,
            filter: read::member::list::Filter { bounds },
        });
        let page = <Self as Query<query::members::List>>::execute(self, query)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;
        log::trace!("page #{ticket} fetched with {} rows", page.len());

        Ok(Fetched { ticket, page })
    }
}

/// Error of [`FetchPage`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`source::Source`] error.
    #[display("`Source` operation failed: {_0}")]
    Source(source::Error),
}
