//! [`Table`] driving a [`Pager`] with scroll and navigation events.

use std::rc::Rc;

use service::{
    command::{fetch_page::ExecutionError, Command, FetchPage, Fetched},
    domain::{
        member,
        window::{Controller, Direction},
        Member, Window,
    },
    pager::{Delivery, Metrics, Request, Ticket, View},
    Pager, Service,
};
use time::UtcOffset;
use tokio::{sync::mpsc, task};
use tracerr::Traced;
use tracing as log;

/// Completion of a spawned page fetch.
#[derive(Debug)]
enum Completion {
    /// Page was fetched.
    Fetched(Fetched),

    /// Page failed to be fetched.
    Failed(Ticket, Traced<ExecutionError>),
}

/// Scrollable viewport a [`Table`] lays its rows out in.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    /// Height of a single row.
    pub row_height: f64,

    /// Height of the visible part.
    pub height: f64,
}

impl Viewport {
    /// Returns [`Metrics`] of this [`Viewport`] showing the provided number
    /// of rows scrolled to the provided offset.
    ///
    /// The offset is clamped to the scrollable range.
    #[expect(clippy::cast_precision_loss, reason = "row counts are small")]
    #[must_use]
    pub fn metrics(&self, rows: usize, scroll_top: f64) -> Metrics {
        let scroll_height = rows as f64 * self.row_height;
        let max_top = (scroll_height - self.height).max(0.0);
        Metrics {
            scroll_height,
            scroll_top: scroll_top.clamp(0.0, max_top),
            client_height: self.height,
        }
    }

    /// Returns [`Metrics`] of this [`Viewport`] scrolled to the very bottom
    /// of the provided number of rows.
    #[must_use]
    pub fn at_bottom(&self, rows: usize) -> Metrics {
        self.metrics(rows, f64::INFINITY)
    }
}

/// Availability table of team [`Member`]s loaded page by page while being
/// scrolled.
///
/// Pages are fetched on local tasks, so a [`Table`] must be driven inside a
/// [`task::LocalSet`]. Fetch results are applied to the [`Pager`] only when
/// polled via [`Table::next_completion()`] or [`Table::settle()`]. Once a
/// page is appended, the rows are laid out in the [`Viewport`] and the next
/// page is requested right away if the bottom is still near, so viewports
/// taller than a page get filled without scrolling.
#[derive(Debug)]
pub struct Table<Src> {
    /// [`Service`] executing page fetches.
    service: Rc<Service<Src>>,

    /// [`Controller`] of the browsing date.
    controller: Controller,

    /// [`Pager`] of the currently browsed [`Window`].
    pager: Pager<member::Id, Member>,

    /// [`Viewport`] the rows are laid out in.
    viewport: Viewport,

    /// Last reported scroll offset of the [`Viewport`].
    scroll_top: f64,

    /// Sending half of the completions channel, cloned into every fetch.
    sender: mpsc::UnboundedSender<Completion>,

    /// Receiving half of the completions channel.
    receiver: mpsc::UnboundedReceiver<Completion>,

    /// Number of spawned fetches whose completions aren't received yet.
    pending: usize,
}

impl<Src> Table<Src>
where
    Src: 'static,
    Service<Src>:
        Command<FetchPage, Ok = Fetched, Err = Traced<ExecutionError>>,
{
    /// Creates a new [`Table`] browsing the [`Window`] of the provided
    /// [`Controller`] in the provided [`Viewport`].
    ///
    /// Nothing is fetched until the [`Table`] is [mounted].
    ///
    /// [mounted]: Table::mount
    #[must_use]
    pub fn new(
        service: Service<Src>,
        controller: Controller,
        viewport: Viewport,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pager = service.pager(controller.window());
        Self {
            service: Rc::new(service),
            controller,
            pager,
            viewport,
            scroll_top: 0.0,
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Creates a new [`Table`] browsing the current day in the local time
    /// zone.
    #[must_use]
    pub fn today(service: Service<Src>, viewport: Viewport) -> Self {
        Self::new(service, Controller::today(local_offset()), viewport)
    }

    /// Returns the currently browsed [`Window`].
    #[must_use]
    pub fn window(&self) -> Window {
        self.pager.window()
    }

    /// Returns the [`Viewport`] the rows are laid out in.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the [`View`] of the fetched rows.
    #[must_use]
    pub fn view(&self) -> View<'_, Member> {
        self.pager.view()
    }

    /// Starts fetching the first page of the current [`Window`].
    ///
    /// Returns whether a fetch was spawned.
    pub fn mount(&mut self) -> bool {
        let request = self.pager.start();
        self.spawn(request)
    }

    /// Reacts on a scroll event, fetching the next page when the bottom of
    /// the content is near.
    ///
    /// Returns whether a fetch was spawned.
    pub fn scroll(&mut self, metrics: &Metrics) -> bool {
        self.scroll_top = metrics.scroll_top;
        let request = self.pager.on_scroll(metrics);
        self.spawn(request)
    }

    /// Moves the browsing date one day in the provided [`Direction`] and
    /// starts fetching the new [`Window`] from its first page.
    ///
    /// Fetches of the previous [`Window`] are abandoned and their results
    /// dropped on arrival. [`None`] is returned if the date cannot be moved.
    pub fn navigate(&mut self, direction: Direction) -> Option<Window> {
        let window = self.controller.navigate(direction)?;
        self.pager.reset(window);
        self.scroll_top = 0.0;
        _ = self.mount();
        Some(window)
    }

    /// Waits for the next spawned fetch to complete and applies its result.
    ///
    /// An appended page may spawn the fetch of the next one, if the laid out
    /// rows still leave the bottom near. [`None`] is returned if no fetch is
    /// pending.
    pub async fn next_completion(&mut self) -> Option<Delivery> {
        if self.pending == 0 {
            return None;
        }
        let completion = self.receiver.recv().await?;
        self.pending -= 1;

        let delivery = match completion {
            Completion::Fetched(Fetched { ticket, page }) => {
                self.pager.on_fetched(ticket, page)
            }
            Completion::Failed(ticket, e) => {
                log::warn!("failed to fetch page #{ticket}: {e}");
                self.pager.on_failed(ticket)
            }
        };
        if let Delivery::Appended(_) = delivery {
            let metrics = self
                .viewport
                .metrics(self.pager.rows().len(), self.scroll_top);
            let request = self.pager.on_scroll(&metrics);
            _ = self.spawn(request);
        }
        Some(delivery)
    }

    /// Applies results of all the pending fetches.
    pub async fn settle(&mut self) -> Vec<Delivery> {
        let mut deliveries = Vec::with_capacity(self.pending);
        while let Some(delivery) = self.next_completion().await {
            deliveries.push(delivery);
        }
        deliveries
    }

    /// Spawns the fetch of the provided [`Request`], if any.
    fn spawn(&mut self, request: Option<Request<member::Id>>) -> bool {
        let Some(request) = request else {
            return false;
        };
        let ticket = request.ticket;
        let service = Rc::clone(&self.service);
        let sender = self.sender.clone();

        self.pending += 1;
        _ = task::spawn_local(async move {
            let completion = match service.execute(FetchPage(request)).await
            {
                Ok(fetched) => Completion::Fetched(fetched),
                Err(e) => Completion::Failed(ticket, e),
            };
            // Receiver lives as long as the `Table` does.
            _ = sender.send(completion);
        });
        true
    }
}

/// Detects the local [`UtcOffset`], falling back to [`UtcOffset::UTC`].
#[must_use]
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or_else(|e| {
        log::warn!("failed to detect local offset, using UTC: {e}");
        UtcOffset::UTC
    })
}
