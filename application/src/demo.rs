//! Synthetic team roster and scrolling replay of the demo session.

use std::time::Duration;

use common::Day;
use service::{
    command::{fetch_page::ExecutionError, Command, FetchPage, Fetched},
    domain::{
        availability::Interval,
        member::{self, Name, TimeZone, Username},
        Member,
    },
    infra::{Roster, Source},
    pager::Delivery,
    Service,
};
use tracerr::Traced;
use tracing as log;

use crate::Table;

/// First names the synthetic [`Member`]s are named with.
const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Grace", "Hedy",
    "Ken", "Leslie", "Margaret", "Niklaus", "Radia", "Tony",
];

/// Last names the synthetic [`Member`]s are named with.
const LAST_NAMES: &[&str] = &[
    "Allen", "Hamilton", "Hoare", "Hopper", "Kernighan", "Lamarr", "Liskov",
    "Lovelace", "Perlman", "Ritchie", "Thompson", "Turing", "Wirth",
];

/// [`TimeZone`]s the synthetic [`Member`]s work in.
const TIME_ZONES: &[&str] = &[
    "UTC",
    "Europe/Berlin",
    "America/New_York",
    "Asia/Tokyo",
    "Australia/Sydney",
    "America/Argentina/Buenos_Aires",
];

/// Seconds in an hour.
const HOUR: u64 = 60 * 60;

/// Creates a [`Roster`] of `count` synthetic [`Member`]s available around the
/// provided [`Day`].
#[must_use]
pub fn roster(count: usize, day: Day) -> Roster {
    Roster::new((0..count).filter_map(|n| member(n, day)))
}

/// Creates the `n`th synthetic [`Member`].
fn member(n: usize, day: Day) -> Option<Member> {
    let first = FIRST_NAMES[n % FIRST_NAMES.len()];
    let last = LAST_NAMES[(n / FIRST_NAMES.len()) % LAST_NAMES.len()];
    let round = n / (FIRST_NAMES.len() * LAST_NAMES.len());
    let (name, username) = if round == 0 {
        (format!("{first} {last}"), format!("{first}.{last}"))
    } else {
        (
            format!("{first} {last} {round}"),
            format!("{first}.{last}{round}"),
        )
    };

    // Shifts start at varying hours and may cross the day boundaries, so
    // some of them get clamped to the browsed day.
    let seed = u64::try_from(n).ok()?;
    let offset = (seed * 5) % 26;
    let length = 4 + seed % 5;
    let start = day.start::<()>()
        + Duration::from_secs(offset * HOUR)
        - Duration::from_secs(HOUR);
    let shift = Interval::new(
        start.coerce(),
        (start + Duration::from_secs(length * HOUR)).coerce(),
    )?;

    Some(Member {
        id: member::Id::new(),
        name: Name::new(name)?,
        username: (n % 3 != 0)
            .then(|| Username::new(username.to_lowercase()))
            .flatten(),
        time_zone: TimeZone::new(TIME_ZONES[n % TIME_ZONES.len()])?,
        availability: vec![shift],
    })
}

/// [`Source`] delaying every response by a fixed latency.
#[derive(Clone, Copy, Debug)]
pub struct Delayed<Src> {
    /// Wrapped [`Source`].
    inner: Src,

    /// Latency of every response.
    latency: Duration,
}

impl<Src> Delayed<Src> {
    /// Wraps the provided [`Source`] into a [`Delayed`] one.
    #[must_use]
    pub const fn new(inner: Src, latency: Duration) -> Self {
        Self { inner, latency }
    }
}

impl<Args, Src> Source<Args> for Delayed<Src>
where
    Src: Source<Args>,
{
    type Ok = Src::Ok;
    type Err = Src::Err;

    async fn execute(&self, args: Args) -> Result<Self::Ok, Self::Err> {
        tokio::time::sleep(self.latency).await;
        self.inner.execute(args).await
    }
}

/// Keeps scrolling the [`Table`] to its bottom until no more pages are
/// requested, returning the number of appended pages.
///
/// Stops on the first failed page, leaving the retry to the next scroll.
pub async fn scroll_to_bottom<Src>(table: &mut Table<Src>) -> usize
where
    Src: 'static,
    Service<Src>:
        Command<FetchPage, Ok = Fetched, Err = Traced<ExecutionError>>,
{
    let mut pages = 0;
    loop {
        let deliveries = table.settle().await;
        pages += deliveries
            .iter()
            .filter(|d| matches!(d, Delivery::Appended(_)))
            .count();

        let view = table.view();
        log::info!(
            "{}: {} of {} members loaded",
            view.window.day,
            view.rows.len(),
            view.total_count
                .map_or_else(|| "?".to_owned(), |c| c.to_string()),
        );
        if deliveries.contains(&Delivery::Failed) {
            log::warn!("stopped scrolling {} after a failure", view.window.day);
            break;
        }

        let metrics = table.viewport().at_bottom(view.rows.len());
        if !table.scroll(&metrics) {
            break;
        }
    }
    pages
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::Day;
    use service::{
        domain::window::{Controller, Direction},
        Config, Service,
    };
    use time::{Date, Month, UtcOffset};
    use tokio::task::LocalSet;

    use crate::{table::Viewport, Table};

    use super::{roster, scroll_to_bottom, Delayed};

    fn day() -> Day {
        let date = Date::from_calendar_date(2024, Month::March, 5).unwrap();
        Day::new(date, UtcOffset::UTC)
    }

    const VIEWPORT: Viewport = Viewport {
        row_height: 36.0,
        height: 540.0,
    };

    #[test]
    fn roster_has_requested_size() {
        assert_eq!(roster(95, day()).len(), 95);
        assert_eq!(roster(400, day()).len(), 400);
        assert!(roster(0, day()).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn replays_session_across_days() {
        LocalSet::new()
            .run_until(async {
                let mut table = Table::new(
                    Service::new(
                        Config::default(),
                        Delayed::new(
                            roster(95, day()),
                            Duration::from_millis(20),
                        ),
                    ),
                    Controller::new(day()),
                    VIEWPORT,
                );

                assert!(table.mount());
                assert_eq!(scroll_to_bottom(&mut table).await, 5);
                assert_eq!(table.view().rows.len(), 95);

                let next = table.navigate(Direction::Next).unwrap();
                assert!(table.view().rows.is_empty());
                assert_eq!(scroll_to_bottom(&mut table).await, 5);
                assert_eq!(table.view().window, next);
                assert_eq!(table.view().rows.len(), 95);
            })
            .await;
    }
}
