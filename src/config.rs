use crate::astro_math::{Degrees, Hours};
use crate::util::{MountKind, PointingModelFlags};
use serde::{Deserialize, Serialize};

/* Config */
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub link_settings: LinkSettings,
    pub observation_location: ObservingLocation,
    pub mount_details: MountDetails,
    pub alignment: Alignment,
    pub pointing_model: PointingModelFlags,
    pub dynamic_model: DynamicModelSettings,
    pub offset: OffsetSettings,
    pub goto_settings: GotoSettings,
}

/* Link Settings */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSettings {
    pub timeout_millis: u32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            timeout_millis: 2000,
        }
    }
}

/* Location */
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservingLocation {
    pub latitude: Degrees,
    /// East positive
    pub longitude: Degrees,
    pub elevation: f64,
    /// Torr
    pub pressure: f64,
    /// Celsius
    pub temperature: f64,
}

impl Default for ObservingLocation {
    fn default() -> Self {
        Self {
            latitude: 51.47,
            longitude: 0.0,
            elevation: 15.0,
            pressure: 760.0,
            temperature: 20.0,
        }
    }
}

/* Mount Settings */
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct MountDetails {
    pub kind: Option<MountKind>, // None is rejected when the session starts
    pub primary_counts_per_degree: f64,
    pub secondary_counts_per_degree: f64,
    pub minimum_altitude: Degrees,
    pub switch_position: Option<SwitchPosition>, // None for the German mount default
}

impl Default for MountDetails {
    fn default() -> Self {
        Self {
            kind: None,
            primary_counts_per_degree: DEFAULT_COUNTS_PER_DEGREE,
            secondary_counts_per_degree: DEFAULT_COUNTS_PER_DEGREE,
            minimum_altitude: 10.0,
            switch_position: None,
        }
    }
}

/// 2^24 counts per revolution
pub const DEFAULT_COUNTS_PER_DEGREE: f64 = 46603.3778;

/// Encoder angles of the near-pole waypoint used by detour slews
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchPosition {
    pub primary: Degrees,
    pub secondary: Degrees,
}

impl SwitchPosition {
    pub const GERMAN_EQUATORIAL: Self = Self {
        primary: 1.0,
        secondary: -1.0,
    };
}

/* Polar Alignment */
#[derive(Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub polar_az: Degrees,
    pub polar_alt: Degrees,
}

/* Dynamic Model */
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicModelSettings {
    /// Pixels per hour of hour angle
    pub ha_rate: f64,
    pub dec_rate: f64,
    pub arcsec_per_pixel: f64,
}

impl Default for DynamicModelSettings {
    fn default() -> Self {
        Self {
            ha_rate: 0.0,
            dec_rate: 0.0,
            arcsec_per_pixel: 0.54,
        }
    }
}

/* Persisted Offset */
#[derive(Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetSettings {
    pub ha: Hours,
    pub dec: Degrees,
}

/* GoTo Settings */
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GotoSettings {
    pub ra_tolerance: Hours,
    pub dec_tolerance: Degrees,
    /// Excursion on either axis above which a near-pole slew takes a detour
    pub detour_excursion: Degrees,
    /// Distance from the pole within which the detour applies
    pub detour_pole_distance: Degrees,
    pub fast_goto: bool,
}

impl Default for GotoSettings {
    fn default() -> Self {
        Self {
            ra_tolerance: 0.006667,
            dec_tolerance: 0.1,
            detour_excursion: 90.1,
            detour_pole_distance: 10.0,
            fast_goto: false,
        }
    }
}
