//! Availability [`Interval`] definitions.

use common::{unit, DateTimeOf};

#[cfg(doc)]
use common::DateTime;

use super::window::Bounds;
#[cfg(doc)]
use super::{Member, Window};

/// Period of time a [`Member`] is available in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Interval {
    /// [`DateTime`] this [`Interval`] starts at.
    start: StartDateTime,

    /// [`DateTime`] this [`Interval`] ends at.
    end: EndDateTime,
}

impl Interval {
    /// Creates a new [`Interval`] if the `start` precedes the `end`.
    #[must_use]
    pub fn new(start: StartDateTime, end: EndDateTime) -> Option<Self> {
        (start.coerce::<()>() < end.coerce::<()>())
            .then_some(Self { start, end })
    }

    /// Returns the [`DateTime`] this [`Interval`] starts at.
    #[must_use]
    pub fn start(&self) -> StartDateTime {
        self.start
    }

    /// Returns the [`DateTime`] this [`Interval`] ends at.
    #[must_use]
    pub fn end(&self) -> EndDateTime {
        self.end
    }

    /// Indicates whether this [`Interval`] intersects the provided
    /// [`Window`] [`Bounds`].
    #[must_use]
    pub fn overlaps(&self, bounds: &Bounds) -> bool {
        self.start.coerce() <= bounds.end && bounds.start <= self.end.coerce()
    }

    /// Restricts this [`Interval`] to the provided [`Window`] [`Bounds`].
    ///
    /// [`None`] is returned if nothing of this [`Interval`] is left.
    #[must_use]
    pub fn clamp(&self, bounds: &Bounds) -> Option<Self> {
        if !self.overlaps(bounds) {
            return None;
        }
        Self::new(
            self.start.max(bounds.start.coerce()),
            self.end.min(bounds.end.coerce()),
        )
    }
}

/// [`DateTime`] when an [`Interval`] starts.
pub type StartDateTime = DateTimeOf<(Interval, unit::Start)>;

/// [`DateTime`] when an [`Interval`] ends.
pub type EndDateTime = DateTimeOf<(Interval, unit::End)>;
