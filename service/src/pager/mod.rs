//! Scroll-triggered [`Pager`] of a query [`Window`].

pub mod scroll;

use std::fmt;

use common::pagination::{Arguments, Page, TotalCount};
use derive_more::Display;
use smart_default::SmartDefault;
use tracing as log;

use crate::domain::{window, Window};

pub use self::scroll::{should_fetch, Metrics, Threshold};

/// [`Pager`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of rows requested per page.
    #[default(20)]
    pub page_size: usize,

    /// [`Threshold`] triggering the next page request.
    pub threshold: Threshold,
}

/// Tag identifying a single page [`Request`].
///
/// Results are accepted only when tagged with the [`Ticket`] of the request
/// currently in flight, so pages of a previous [`Window`] are never mixed
/// into the current one.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{window}:{seq}")]
pub struct Ticket {
    /// [`window::Id`] the page is requested for.
    pub window: window::Id,

    /// Sequence number of the request.
    pub seq: u64,
}

/// Request of the next page issued by a [`Pager`].
#[derive(Clone, Debug)]
pub struct Request<C> {
    /// [`Ticket`] the result must be delivered with.
    pub ticket: Ticket,

    /// Pagination [`Arguments`] continuing from the last fetched page.
    pub arguments: Arguments<C>,

    /// [`window::Bounds`] of the [`Window`] the page is requested for.
    pub bounds: window::Bounds,
}

/// Outcome of delivering a fetch result to a [`Pager`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Delivery {
    /// Rows of the page were appended.
    Appended(usize),

    /// The request failed and may be retried on the next scroll.
    Failed,

    /// The result belongs to a request that isn't in flight anymore.
    Stale,
}

/// Rows and loading state handed to a rendering layer.
#[derive(Debug)]
pub struct View<'a, I> {
    /// [`Window`] the rows belong to.
    pub window: Window,

    /// Rows fetched so far, in page-fetch order.
    pub rows: &'a [I],

    /// Indicator whether a page is being fetched.
    pub loading: bool,

    /// Total count of rows in the [`Window`], once known.
    pub total_count: Option<TotalCount>,
}

/// Infinite-scroll pager over cursor-chained pages of a single [`Window`].
#[derive(Debug)]
pub struct Pager<C, I> {
    /// [`Config`] of this [`Pager`].
    config: Config,

    /// [`Window`] the pages are fetched for.
    window: Window,

    /// Rows of all fetched pages.
    rows: Vec<I>,

    /// Number of fetched pages.
    pages: usize,

    /// Total count of rows reported by the first page.
    total_count: Option<TotalCount>,

    /// Cursor to request the next page after.
    next_cursor: Option<C>,

    /// [`Ticket`] of the request in flight.
    in_flight: Option<Ticket>,

    /// Sequence number of the last issued [`Ticket`].
    seq: u64,
}

impl<C, I> Pager<C, I>
where
    C: Clone + fmt::Debug,
{
    /// Creates a new empty [`Pager`] for the provided [`Window`].
    #[must_use]
    pub fn new(window: Window, config: Config) -> Self {
        Self {
            config,
            window,
            rows: Vec::new(),
            pages: 0,
            total_count: None,
            next_cursor: None,
            in_flight: None,
            seq: 0,
        }
    }

    /// Returns the [`Window`] of this [`Pager`].
    #[must_use]
    pub fn window(&self) -> Window {
        self.window
    }

    /// Returns the rows fetched so far.
    #[must_use]
    pub fn rows(&self) -> &[I] {
        &self.rows
    }

    /// Returns the number of fetched pages.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Returns the total count of rows, once the first page is fetched.
    #[must_use]
    pub fn total_count(&self) -> Option<TotalCount> {
        self.total_count
    }

    /// Indicates whether a page is being fetched.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Indicates whether more pages may still be fetched.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        match self.total_count {
            None => true,
            Some(total) => {
                self.next_cursor.is_some() && self.rows.len() < total.get()
            }
        }
    }

    /// Returns the [`View`] for a rendering layer.
    #[must_use]
    pub fn view(&self) -> View<'_, I> {
        View {
            window: self.window,
            rows: &self.rows,
            loading: self.is_loading(),
            total_count: self.total_count,
        }
    }

    /// Requests the first page of the [`Window`].
    ///
    /// [`None`] is returned if the first page is already fetched or is being
    /// fetched.
    pub fn start(&mut self) -> Option<Request<C>> {
        (self.total_count.is_none() && self.in_flight.is_none())
            .then(|| self.issue())
    }

    /// Reacts on the provided scroll [`Metrics`] by requesting the next page
    /// if the content bottom is near.
    ///
    /// Also to be called right after a page is rendered, so the viewports
    /// too tall to be scrolled still get filled.
    pub fn on_scroll(&mut self, metrics: &Metrics) -> Option<Request<C>> {
        let Some(total) = self.total_count else {
            // The first page failed to load, so retry it.
            return self.start();
        };
        if self.next_cursor.is_none() {
            return None;
        }

        should_fetch(
            metrics,
            self.config.threshold,
            self.in_flight.is_some(),
            self.rows.len(),
            total.get(),
        )
        .then(|| self.issue())
    }

    /// Delivers the fetched [`Page`] tagged with the provided [`Ticket`].
    pub fn on_fetched(
        &mut self,
        ticket: Ticket,
        page: Page<C, I>,
    ) -> Delivery {
        if self.in_flight != Some(ticket) {
            log::debug!("dropping stale page #{ticket}");
            return Delivery::Stale;
        }
        self.in_flight = None;

        let total = *self.total_count.get_or_insert(page.total_count);
        if page.total_count != total {
            log::warn!(
                "page #{ticket} reports {} rows in total instead of {total}, \
                 keeping {total}",
                page.total_count,
            );
        }

        self.next_cursor = page.next_cursor();
        let room = total.get().saturating_sub(self.rows.len());
        if page.len() > room {
            log::warn!(
                "page #{ticket} has {} rows, but only {room} fit into total \
                 {total}, truncating",
                page.len(),
            );
        }

        let before = self.rows.len();
        self.rows.extend(page.into_nodes().take(room));
        self.pages += 1;

        let appended = self.rows.len() - before;
        log::debug!(
            "page #{ticket} appended {appended} rows ({}/{total}), next \
             cursor: {:?}",
            self.rows.len(),
            self.next_cursor,
        );
        Delivery::Appended(appended)
    }

    /// Delivers the failure of a request tagged with the provided [`Ticket`].
    ///
    /// Nothing is appended, the next scroll retries the same page.
    pub fn on_failed(&mut self, ticket: Ticket) -> Delivery {
        if self.in_flight != Some(ticket) {
            log::debug!("dropping stale failure of page #{ticket}");
            return Delivery::Stale;
        }
        self.in_flight = None;

        log::warn!("page #{ticket} failed, retrying on the next scroll");
        Delivery::Failed
    }

    /// Switches this [`Pager`] to the provided [`Window`], discarding all the
    /// fetched pages and abandoning the request in flight.
    pub fn reset(&mut self, window: Window) {
        if let Some(ticket) = self.in_flight.take() {
            log::debug!("abandoning page #{ticket}");
        }
        self.window = window;
        self.rows.clear();
        self.pages = 0;
        self.total_count = None;
        self.next_cursor = None;
    }

    /// Issues a [`Request`] of the next page and marks it as being in flight.
    fn issue(&mut self) -> Request<C> {
        self.seq += 1;
        let ticket = Ticket {
            window: self.window.id,
            seq: self.seq,
        };
        self.in_flight = Some(ticket);

        log::debug!(
            "requesting page #{ticket} of {} after {:?}",
            self.window.day,
            self.next_cursor,
        );
        Request {
            ticket,
            arguments: Arguments {
                first: self.config.page_size,
                after: self.next_cursor.clone(),
            },
            bounds: self.window.bounds(),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{
        pagination::{Page, TotalCount},
        Day,
    };
    use time::{Date, Month, UtcOffset};

    use crate::domain::window::Controller;

    use super::{Config, Delivery, Metrics, Pager, Request, Threshold};

    const AT_BOTTOM: Metrics = Metrics {
        scroll_height: 1000.0,
        scroll_top: 500.0,
        client_height: 500.0,
    };

    const FAR_FROM_BOTTOM: Metrics = Metrics {
        scroll_height: 5000.0,
        scroll_top: 0.0,
        client_height: 500.0,
    };

    fn controller() -> Controller {
        let date = Date::from_calendar_date(2024, Month::March, 5).unwrap();
        Controller::new(Day::new(date, UtcOffset::UTC))
    }

    fn pager(page_size: usize) -> Pager<u32, u32> {
        Pager::new(
            controller().window(),
            Config {
                page_size,
                threshold: Threshold::default(),
            },
        )
    }

    /// Serves the requested page out of `total` rows numbered from `1`.
    fn serve(req: &Request<u32>, total: u32) -> Page<u32, u32> {
        let from = req.arguments.after.unwrap_or(0);
        let size = u32::try_from(req.arguments.first).unwrap();
        let to = (from + size).min(total);
        Page::new(
            (from + 1..=to).map(|n| (n, n)),
            to < total,
            TotalCount::from(total as usize),
        )
    }

    /// Scrolls to the bottom until nothing is requested anymore.
    fn drain(pager: &mut Pager<u32, u32>, total: u32) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut next = pager.start();
        while let Some(req) = next {
            match pager.on_fetched(req.ticket, serve(&req, total)) {
                Delivery::Appended(n) => sizes.push(n),
                other => panic!("unexpected delivery: {other:?}"),
            }
            next = pager.on_scroll(&AT_BOTTOM);
        }
        sizes
    }

    #[test]
    fn fetches_pages_until_total() {
        let mut pager = pager(10);

        assert_eq!(drain(&mut pager, 25), [10, 10, 5]);
        assert_eq!(pager.rows().len(), 25);
        assert_eq!(pager.pages(), 3);
        assert!(!pager.has_next_page());
        assert!(pager.on_scroll(&AT_BOTTOM).is_none());
    }

    #[test]
    fn flattened_rows_keep_fetch_order() {
        let mut pager = pager(4);
        _ = drain(&mut pager, 10);

        assert_eq!(pager.rows(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn flattened_length_is_capped_by_total() {
        for (page_size, total, pages) in [(10, 25, 2), (10, 25, 3), (7, 7, 1)]
        {
            let mut pager = pager(page_size);
            let mut next = pager.start();
            for _ in 0..pages {
                let req = next.unwrap();
                _ = pager.on_fetched(req.ticket, serve(&req, total));
                next = pager.on_scroll(&AT_BOTTOM);
            }

            assert_eq!(
                pager.rows().len(),
                (pages * page_size).min(total as usize),
            );
        }
    }

    #[test]
    fn does_not_fetch_far_from_bottom() {
        let mut pager = pager(10);
        let req = pager.start().unwrap();
        _ = pager.on_fetched(req.ticket, serve(&req, 100));

        assert!(pager.on_scroll(&FAR_FROM_BOTTOM).is_none());
        assert!(!pager.is_loading());
        assert!(pager.on_scroll(&AT_BOTTOM).is_some());
    }

    #[test]
    fn never_overlaps_requests() {
        let mut pager = pager(10);
        let first = pager.start().unwrap();

        assert!(pager.start().is_none());
        assert!(pager.on_scroll(&AT_BOTTOM).is_none());
        assert!(pager.view().loading);

        _ = pager.on_fetched(first.ticket, serve(&first, 100));
        let second = pager.on_scroll(&AT_BOTTOM).unwrap();

        assert!(pager.on_scroll(&AT_BOTTOM).is_none());
        assert_eq!(second.arguments.after, Some(10));
        assert_ne!(second.ticket, first.ticket);
    }

    #[test]
    fn ignores_repeated_delivery() {
        let mut pager = pager(10);
        let req = pager.start().unwrap();

        assert_eq!(
            pager.on_fetched(req.ticket, serve(&req, 100)),
            Delivery::Appended(10),
        );
        assert_eq!(
            pager.on_fetched(req.ticket, serve(&req, 100)),
            Delivery::Stale,
        );
        assert_eq!(pager.rows().len(), 10);
    }

    #[test]
    fn window_change_restarts_pagination() {
        let mut ctrl = controller();
        let mut pager = Pager::<u32, u32>::new(
            ctrl.window(),
            Config {
                page_size: 10,
                threshold: Threshold::default(),
            },
        );
        let first = pager.start().unwrap();
        _ = pager.on_fetched(first.ticket, serve(&first, 100));
        let stale = pager.on_scroll(&AT_BOTTOM).unwrap();

        let next_day = ctrl.advance().unwrap();
        pager.reset(next_day);

        assert!(pager.rows().is_empty());
        assert_eq!(pager.pages(), 0);
        assert_eq!(pager.total_count(), None);
        assert!(!pager.view().loading);
        assert_eq!(pager.window(), next_day);

        let restarted = pager.start().unwrap();
        assert_eq!(restarted.arguments.after, None);
        assert_eq!(restarted.bounds, next_day.bounds());
        assert_eq!(restarted.ticket.window, next_day.id);

        assert_eq!(
            pager.on_fetched(stale.ticket, serve(&stale, 100)),
            Delivery::Stale,
        );
        assert!(pager.rows().is_empty());

        _ = pager.on_fetched(restarted.ticket, serve(&restarted, 3));
        assert_eq!(pager.rows(), [1, 2, 3]);
    }

    #[test]
    fn failure_allows_retry() {
        let mut pager = pager(10);
        let first = pager.start().unwrap();

        assert_eq!(pager.on_failed(first.ticket), Delivery::Failed);
        assert!(!pager.is_loading());
        assert!(pager.rows().is_empty());

        let retry = pager.on_scroll(&FAR_FROM_BOTTOM).unwrap();
        assert_eq!(retry.arguments.after, None);
        _ = pager.on_fetched(retry.ticket, serve(&retry, 30));

        let second = pager.on_scroll(&AT_BOTTOM).unwrap();
        _ = pager.on_failed(second.ticket);
        assert_eq!(pager.rows().len(), 10);

        let again = pager.on_scroll(&AT_BOTTOM).unwrap();
        assert_eq!(again.arguments.after, second.arguments.after);
        assert_eq!(pager.on_failed(second.ticket), Delivery::Stale);
    }

    #[test]
    fn truncates_rows_beyond_total() {
        let mut pager = pager(10);
        let req = pager.start().unwrap();

        let oversized = Page::new((1..=8).map(|n| (n, n)), true, 5.into());
        assert_eq!(
            pager.on_fetched(req.ticket, oversized),
            Delivery::Appended(5),
        );
        assert_eq!(pager.rows().len(), 5);
        assert!(pager.on_scroll(&AT_BOTTOM).is_none());
    }

    #[test]
    fn keeps_first_total_count() {
        let mut pager = pager(2);
        let req = pager.start().unwrap();
        _ = pager.on_fetched(req.ticket, serve(&req, 4));

        let req = pager.on_scroll(&AT_BOTTOM).unwrap();
        let drifted = Page::new([(3, 3), (4, 4)], true, 9.into());
        _ = pager.on_fetched(req.ticket, drifted);

        assert_eq!(pager.total_count(), Some(4.into()));
        assert!(pager.on_scroll(&AT_BOTTOM).is_none());
    }

    #[test]
    fn empty_window_requests_nothing_more() {
        let mut pager = pager(10);

        assert_eq!(drain(&mut pager, 0), [0]);
        assert!(pager.rows().is_empty());
        assert_eq!(pager.total_count(), Some(0.into()));
        assert!(!pager.has_next_page());
    }
}
