//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData, ops, time::Duration};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::well_known::Rfc3339, Date, OffsetDateTime, UtcOffset,
};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        Self::truncated(OffsetDateTime::now_utc())
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the calendar [`Date`] of this [`DateTime`] observed at the
    /// provided [`UtcOffset`].
    #[must_use]
    pub fn date_at(&self, offset: UtcOffset) -> Date {
        self.inner.to_offset(offset).date()
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }

    /// Converts the provided [`OffsetDateTime`] to UTC with a microsecond
    /// precision.
    fn truncated(dt: OffsetDateTime) -> Self {
        dt.try_into().expect("infallible")
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into an [`DateTime`].
    Parse(time::error::Parse),

    /// Parsed [`DateTime`] has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

impl<Of: ?Sized> ops::Add<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner + rhs,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> ops::Sub<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner - rhs,
            _of: PhantomData,
        }
    }
}

/// Calendar day observed at a fixed [`UtcOffset`].
///
/// A [`Day`] spans from its midnight up to (and including) its last
/// microsecond, both taken at the [`UtcOffset`] it was created with.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{date} ({offset})")]
pub struct Day {
    /// Calendar date of this [`Day`].
    date: Date,

    /// [`UtcOffset`] this [`Day`] is observed at.
    offset: UtcOffset,
}

impl Day {
    /// Creates a new [`Day`] of the provided `date` at the provided `offset`.
    #[must_use]
    pub const fn new(date: Date, offset: UtcOffset) -> Self {
        Self { date, offset }
    }

    /// Returns the current [`Day`] observed at the provided `offset`.
    #[must_use]
    pub fn today(offset: UtcOffset) -> Self {
        Self::new(DateTime::now().date_at(offset), offset)
    }

    /// Returns the calendar [`Date`] of this [`Day`].
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Returns the [`UtcOffset`] this [`Day`] is observed at.
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Returns the first instant of this [`Day`].
    #[must_use]
    pub fn start<Of: ?Sized>(&self) -> DateTimeOf<Of> {
        DateTimeOf::truncated(self.date.midnight().assume_offset(self.offset))
    }

    /// Returns the last instant of this [`Day`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn end<Of: ?Sized>(&self) -> DateTimeOf<Of> {
        DateTimeOf::truncated(
            self.date
                .with_hms_micro(23, 59, 59, 999_999)
                .expect("valid time")
                .assume_offset(self.offset),
        )
    }

    /// Returns the [`Day`] following this one.
    ///
    /// [`None`] is returned at the end of the supported calendar range.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        Self::new(self.date.next_day()?, self.offset).representable()
    }

    /// Returns the [`Day`] preceding this one.
    ///
    /// [`None`] is returned at the start of the supported calendar range.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        Self::new(self.date.previous_day()?, self.offset).representable()
    }

    /// Indicates whether the provided instant falls into this [`Day`].
    #[must_use]
    pub fn contains<Of: ?Sized>(&self, dt: DateTimeOf<Of>) -> bool {
        self.start::<Of>() <= dt && dt <= self.end::<Of>()
    }

    /// Checks whether both bounds of this [`Day`] are representable in UTC.
    fn representable(self) -> Option<Self> {
        let start = self.date.midnight();
        let end = self.date.with_hms(23, 59, 59).ok()?;
        [start, end]
            .into_iter()
            .all(|at| {
                at.assume_offset(self.offset)
                    .checked_to_offset(UtcOffset::UTC)
                    .is_some()
            })
            .then_some(self)
    }
}

#[cfg(test)]
mod spec {
    use time::{Date, Month, UtcOffset};

    use super::{DateTime, Day};

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).unwrap()
    }

    fn dt(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    #[test]
    fn day_bounds_at_utc() {
        let day = Day::new(date(2024, Month::March, 5), UtcOffset::UTC);

        assert_eq!(day.start::<()>(), dt("2024-03-05T00:00:00Z"));
        assert_eq!(day.end::<()>(), dt("2024-03-05T23:59:59.999999Z"));
    }

    #[test]
    fn day_bounds_follow_offset() {
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        let day = Day::new(date(2024, Month::March, 5), offset);

        assert_eq!(day.start::<()>(), dt("2024-03-04T22:00:00Z"));
        assert_eq!(day.end::<()>(), dt("2024-03-05T21:59:59.999999Z"));

        let offset = UtcOffset::from_hms(-5, -30, 0).unwrap();
        let day = Day::new(date(2024, Month::March, 5), offset);

        assert_eq!(day.start::<()>(), dt("2024-03-05T05:30:00Z"));
    }

    #[test]
    fn consecutive_days_do_not_overlap() {
        let day = Day::new(date(2024, Month::December, 31), UtcOffset::UTC);
        let next = day.next().unwrap();

        assert_eq!(next.date(), date(2025, Month::January, 1));
        assert!(day.end::<()>() < next.start::<()>());
        assert_eq!(next.previous(), Some(day));
    }

    #[test]
    fn contains() {
        let day = Day::new(date(2024, Month::March, 5), UtcOffset::UTC);

        assert!(day.contains(dt("2024-03-05T00:00:00Z")));
        assert!(day.contains(dt("2024-03-05T12:30:00Z")));
        assert!(day.contains(dt("2024-03-05T23:59:59.999999Z")));
        assert!(!day.contains(dt("2024-03-06T00:00:00Z")));
        assert!(!day.contains(dt("2024-03-04T23:59:59Z")));
    }

    #[test]
    fn calendar_range_is_bounded() {
        assert!(Day::new(Date::MAX, UtcOffset::UTC).next().is_none());
        assert!(Day::new(Date::MIN, UtcOffset::UTC).previous().is_none());

        let west = UtcOffset::from_hms(-5, 0, 0).unwrap();
        let last = Date::MAX.previous_day().unwrap();
        assert!(Day::new(last, west).next().is_none());

        let east = UtcOffset::from_hms(5, 0, 0).unwrap();
        let first = Date::MIN.next_day().unwrap();
        assert!(Day::new(first, east).previous().is_none());
    }

    #[test]
    fn rfc3339_keeps_microseconds() {
        assert_eq!(
            dt("2024-03-05T10:00:00.123456789+01:00").to_rfc3339(),
            "2024-03-05T09:00:00.123456Z",
        );
    }
}
