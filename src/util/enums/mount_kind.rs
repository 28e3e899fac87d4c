use serde::{Deserialize, Serialize};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountKind {
    /// Altitude-Azimuth mount, encoders follow Az/Alt directly
    AltAzimuth,
    /// Equatorial fork, no pier ambiguity
    EquatorialFork,
    /// German equatorial mount
    GermanEquatorial,
}

impl MountKind {
    pub fn is_equatorial(self) -> bool {
        !matches!(self, MountKind::AltAzimuth)
    }

    pub fn is_german(self) -> bool {
        matches!(self, MountKind::GermanEquatorial)
    }
}
