//! [`Member`] definitions.

use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use uuid::Uuid;

use super::{availability::Interval, window::Bounds};
#[cfg(doc)]
use super::Window;

/// Team member whose availability is displayed.
///
/// [`Member`]s are immutable snapshots of a single query [`Window`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    /// ID of this [`Member`].
    pub id: Id,

    /// [`Name`] of this [`Member`].
    pub name: Name,

    /// [`Username`] of this [`Member`], if any.
    pub username: Option<Username>,

    /// [`TimeZone`] this [`Member`] works in.
    pub time_zone: TimeZone,

    /// Availability [`Interval`]s of this [`Member`], ordered by their start.
    pub availability: Vec<Interval>,
}

impl Member {
    /// Returns availability of this [`Member`] restricted to the provided
    /// [`Window`] [`Bounds`].
    pub fn availability_in<'a>(
        &'a self,
        bounds: &'a Bounds,
    ) -> impl Iterator<Item = Interval> + 'a {
        self.availability.iter().filter_map(|i| i.clamp(bounds))
    }

    /// Returns a copy of this [`Member`] with the availability restricted to
    /// the provided [`Window`] [`Bounds`].
    #[must_use]
    pub fn within(&self, bounds: &Bounds) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            time_zone: self.time_zone.clone(),
            availability: self.availability_in(bounds).collect(),
        }
    }
}

/// ID of a [`Member`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Display name of a [`Member`].
#[derive(AsRef, Clone, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Username of a [`Member`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Username(String);

impl Username {
    /// Creates a new [`Username`] if the given `username` is valid.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Option<Self> {
        let username = username.into();
        Self::check(&username).then_some(Self(username))
    }

    /// Checks whether the given `username` is a valid [`Username`].
    fn check(username: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Username`] invariants:
        /// - Must start with a letter or a digit;
        /// - Must contain only letters, digits, `-`, `_` and `.`;
        /// - Must be between 1 and 64 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N}._-]{0,63}$")
                .expect("valid regex")
        });

        REGEX.is_match(username.as_ref())
    }
}

impl FromStr for Username {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Username`")
    }
}

/// Identifier of a time zone a [`Member`] works in.
///
/// Either `UTC` or an [IANA] identifier like `Europe/Berlin`. It is never
/// interpreted here, only carried to the presentation layer.
///
/// [IANA]: https://www.iana.org/time-zones
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct TimeZone(String);

impl TimeZone {
    /// Creates a new [`TimeZone`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// [`TimeZone`] of the Coordinated Universal Time.
    #[must_use]
    pub fn utc() -> Self {
        Self("UTC".to_owned())
    }

    /// Checks whether the given `id` is a valid [`TimeZone`].
    fn check(id: impl AsRef<str>) -> bool {
        /// Regular expression checking [`TimeZone`] identifier format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(UTC|[A-Z][A-Za-z_]+(/[A-Za-z0-9_+-]+){1,2})$")
                .expect("valid regex")
        });

        REGEX.is_match(id.as_ref())
    }
}

impl FromStr for TimeZone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `TimeZone`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Name, TimeZone, Username};

    #[test]
    fn name() {
        assert!(Name::new("Ada Lovelace").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" Ada").is_none());
        assert!(Name::new("Ada ").is_none());
    }

    #[test]
    fn username() {
        assert!(Username::new("ada.lovelace").is_some());
        assert!(Username::new("ada_1815").is_some());
        assert!(Username::new(".ada").is_none());
        assert!(Username::new("ada lovelace").is_none());
        assert!(Username::new("").is_none());
    }

    #[test]
    fn time_zone() {
        assert!(TimeZone::new("UTC").is_some());
        assert!(TimeZone::new("Europe/Berlin").is_some());
        assert!(TimeZone::new("America/Argentina/Buenos_Aires").is_some());
        assert!(TimeZone::new("Etc/GMT+5").is_some());
        assert!(TimeZone::new("berlin").is_none());
        assert!(TimeZone::new("Europe/").is_none());
        assert_eq!(TimeZone::utc().to_string(), "UTC");
    }
}
