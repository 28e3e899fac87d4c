use crate::astro_math::{self, Degrees, Hours};
use chrono::{DateTime, Utc};

/// Source of the time of day used by the correction chain.
pub trait Clock {
    fn utc(&self) -> DateTime<Utc>;

    /// longitude in degrees, east positive
    fn local_sidereal_time(&self, longitude: Degrees) -> Hours {
        astro_math::calculate_local_sidereal_time(self.utc(), longitude)
    }
}

/// Computer time, optionally shifted so the sky can be simulated at another date
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    date_offset: chrono::Duration,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            date_offset: chrono::Duration::zero(),
        }
    }

    pub fn date_offset(&self) -> chrono::Duration {
        self.date_offset
    }

    pub fn set_date_offset(&mut self, offset: chrono::Duration) {
        self.date_offset = offset;
    }

    /// Shifts the clock so that it currently reads `date`
    pub fn set_utc_date(&mut self, date: DateTime<Utc>) {
        self.date_offset = date - Utc::now();
        tracing::info!("Clock offset set to {}", self.date_offset);
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn utc(&self) -> DateTime<Utc> {
        Utc::now() + self.date_offset
    }
}

/// Always reports the same instant. A pinned sidereal time overrides the one
/// computed from `utc`.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub utc: DateTime<Utc>,
    pub lst: Option<Hours>,
}

impl FixedClock {
    pub fn new(utc: DateTime<Utc>) -> Self {
        Self { utc, lst: None }
    }

    pub fn with_lst(utc: DateTime<Utc>, lst: Hours) -> Self {
        Self {
            utc,
            lst: Some(astro_math::map24(lst)),
        }
    }
}

impl Clock for FixedClock {
    fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn local_sidereal_time(&self, longitude: Degrees) -> Hours {
        match self.lst {
            Some(lst) => lst,
            None => astro_math::calculate_local_sidereal_time(self.utc, longitude),
        }
    }
}
