//! Timezone name resolution.
//!
//! `Local` names the zone of the running process. An empty name and `UTC`
//! both resolve to UTC. Everything else goes through the IANA database.

use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;

use crate::error::{TimelineError, TimelineResult};

pub const LOCAL: &str = "Local";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    Local,
    Utc,
    Iana(Tz),
}

impl Timezone {
    pub fn resolve(name: &str) -> TimelineResult<Self> {
        match name {
            LOCAL => Ok(Self::Local),
            "" | "UTC" => Ok(Self::Utc),
            _ => name
                .parse::<Tz>()
                .map(Self::Iana)
                .map_err(|_| TimelineError::UnknownTimezone(name.to_string())),
        }
    }

    /// Wall-clock view of `instant` in this zone. The instant itself is unchanged.
    pub fn convert(&self, instant: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            Self::Local => instant.with_timezone(&Local).fixed_offset(),
            Self::Utc => instant.with_timezone(&Utc).fixed_offset(),
            Self::Iana(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Local => LOCAL,
            Self::Utc => "UTC",
            Self::Iana(tz) => tz.name(),
        }
    }
}

impl std::fmt::Display for Timezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
