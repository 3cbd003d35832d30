//! Query [`Window`] definitions.

use common::{unit, DateTimeOf, Day};
use derive_more::{Display, From, Into};
use strum::{Display as StrumDisplay, EnumString};
use time::UtcOffset;
use tracing as log;

#[cfg(doc)]
use common::DateTime;

/// Day-bounded scope of a single pagination sequence.
///
/// Every [`Window`] carries a unique [`Id`]. Pages fetched for one [`Window`]
/// are never mixed with pages of another one, even when both cover the same
/// [`Day`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Window {
    /// Query identity of this [`Window`].
    pub id: Id,

    /// [`Day`] covered by this [`Window`].
    pub day: Day,

    /// First instant of this [`Window`].
    pub start: StartDateTime,

    /// Last instant of this [`Window`].
    pub end: EndDateTime,
}

impl Window {
    /// Creates a new [`Window`] covering the provided [`Day`].
    #[must_use]
    pub fn new(id: Id, day: Day) -> Self {
        Self {
            id,
            day,
            start: day.start(),
            end: day.end(),
        }
    }

    /// Returns [`Bounds`] of this [`Window`].
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            start: self.start,
            end: self.end,
        }
    }
}

/// Instants bounding a [`Window`], both inclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bounds {
    /// First instant of a [`Window`].
    pub start: StartDateTime,

    /// Last instant of a [`Window`].
    pub end: EndDateTime,
}

/// Query identity of a [`Window`].
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
pub struct Id(u64);

impl Id {
    /// Returns the [`Id`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Direction of a date navigation.
#[derive(Clone, Copy, Debug, EnumString, Eq, PartialEq, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    /// One day forward.
    Next,

    /// One day backward.
    Previous,
}

/// Owner of the browsing date, producing a new [`Window`] on every change.
#[derive(Clone, Copy, Debug)]
pub struct Controller {
    /// Currently browsed [`Window`].
    current: Window,
}

impl Controller {
    /// Creates a new [`Controller`] browsing the provided [`Day`].
    #[must_use]
    pub fn new(day: Day) -> Self {
        Self {
            current: Window::new(Id::default(), day),
        }
    }

    /// Creates a new [`Controller`] browsing the current [`Day`] at the
    /// provided `offset`.
    #[must_use]
    pub fn today(offset: UtcOffset) -> Self {
        Self::new(Day::today(offset))
    }

    /// Returns the currently browsed [`Window`].
    #[must_use]
    pub fn window(&self) -> Window {
        self.current
    }

    /// Returns [`Bounds`] of the currently browsed [`Window`].
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.current.bounds()
    }

    /// Moves the browsing date one day in the provided [`Direction`].
    ///
    /// [`None`] is returned and the [`Window`] is left unchanged when the
    /// move leaves the supported calendar range.
    pub fn navigate(&mut self, direction: Direction) -> Option<Window> {
        let day = self.current.day;
        let Some(day) = (match direction {
            Direction::Next => day.next(),
            Direction::Previous => day.previous(),
        }) else {
            log::warn!("cannot navigate {direction} from {day}");
            return None;
        };

        self.current = Window::new(self.current.id.next(), day);
        log::debug!(
            "browsing {} from {} to {} as window #{}",
            self.current.day,
            self.current.start.to_rfc3339(),
            self.current.end.to_rfc3339(),
            self.current.id,
        );
        Some(self.current)
    }

    /// Moves the browsing date one day forward.
    pub fn advance(&mut self) -> Option<Window> {
        self.navigate(Direction::Next)
    }

    /// Moves the browsing date one day backward.
    pub fn retreat(&mut self) -> Option<Window> {
        self.navigate(Direction::Previous)
    }
}

/// [`DateTime`] when a [`Window`] starts.
pub type StartDateTime = DateTimeOf<(Window, unit::Start)>;

/// [`DateTime`] when a [`Window`] ends.
pub type EndDateTime = DateTimeOf<(Window, unit::End)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{DateTime, Day};
    use time::{Date, Month, UtcOffset};

    use super::{Bounds, Controller, Direction};

    fn day(year: i32, month: Month, day: u8, offset: UtcOffset) -> Day {
        Day::new(Date::from_calendar_date(year, month, day).unwrap(), offset)
    }

    fn dt(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    #[test]
    fn bounds_cover_local_day() {
        let offset = UtcOffset::from_hms(3, 0, 0).unwrap();
        let ctrl = Controller::new(day(2024, Month::June, 1, offset));

        let Bounds { start, end } = ctrl.bounds();
        assert_eq!(start.coerce(), dt("2024-05-31T21:00:00Z"));
        assert_eq!(end.coerce(), dt("2024-06-01T20:59:59.999999Z"));
    }

    #[test]
    fn navigation_changes_identity() {
        let mut ctrl =
            Controller::new(day(2024, Month::June, 30, UtcOffset::UTC));
        let initial = ctrl.window();

        let next = ctrl.advance().unwrap();
        assert_eq!(next.day, day(2024, Month::July, 1, UtcOffset::UTC));
        assert!(next.id > initial.id);
        assert_eq!(ctrl.window(), next);

        let back = ctrl.retreat().unwrap();
        assert_eq!(back.day, initial.day);
        assert_eq!(back.start, initial.start);
        assert!(back.id > next.id);
        assert_ne!(back, initial);
    }

    #[test]
    fn navigation_stops_at_calendar_edge() {
        let mut ctrl = Controller::new(Day::new(Date::MAX, UtcOffset::UTC));
        let before = ctrl.window();

        assert_eq!(ctrl.navigate(Direction::Next), None);
        assert_eq!(ctrl.window(), before);
    }

    #[test]
    fn direction_from_str() {
        assert_eq!(Direction::from_str("next"), Ok(Direction::Next));
        assert_eq!(Direction::from_str("previous"), Ok(Direction::Previous));
        assert!(Direction::from_str("sideways").is_err());
        assert_eq!(Direction::Previous.to_string(), "previous");
    }
}
