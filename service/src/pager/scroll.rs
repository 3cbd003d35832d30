//! Scroll [`Metrics`] and the prefetching predicate.

use derive_more::{Display, From, Into};
use smart_default::SmartDefault;

/// Scroll metrics reported by a scrollable container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Total height of the scrollable content.
    pub scroll_height: f64,

    /// Current offset of the visible part from the content top.
    pub scroll_top: f64,

    /// Height of the visible part.
    pub client_height: f64,
}

impl Metrics {
    /// Returns the distance between the bottom of the visible part and the
    /// bottom of the content.
    #[must_use]
    pub fn distance_to_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

/// Distance to the content bottom below which the next page is requested.
#[derive(Clone, Copy, Debug, Display, From, Into, PartialEq, SmartDefault)]
pub struct Threshold(#[default(300.0)] f64);

impl Threshold {
    /// Indicates whether the provided [`Metrics`] are close enough to the
    /// content bottom.
    #[must_use]
    pub fn is_reached(self, metrics: &Metrics) -> bool {
        metrics.distance_to_bottom() < self.0
    }
}

/// Decides whether the next page should be fetched.
///
/// Holds when the bottom is nearer than the [`Threshold`], nothing is being
/// fetched and fewer rows than the `total` count are fetched.
#[must_use]
pub fn should_fetch(
    metrics: &Metrics,
    threshold: Threshold,
    in_flight: bool,
    fetched: usize,
    total: usize,
) -> bool {
    threshold.is_reached(metrics) && !in_flight && fetched < total
}
