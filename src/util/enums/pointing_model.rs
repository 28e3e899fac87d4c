use serde::{Deserialize, Serialize};

/// Selects which correction stages run between real and apparent coordinates
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointingModelFlags {
    pub offset: bool,
    pub refraction: bool,
    pub polar: bool,
    pub dynamic: bool,
}

impl PointingModelFlags {
    /// Every stage disabled
    pub const RAW: Self = Self {
        offset: false,
        refraction: false,
        polar: false,
        dynamic: false,
    };

    pub const ALL: Self = Self {
        offset: true,
        refraction: true,
        polar: true,
        dynamic: true,
    };

    pub fn without_offset(self) -> Self {
        Self {
            offset: false,
            ..self
        }
    }

    pub fn is_raw(&self) -> bool {
        *self == Self::RAW
    }

    /// All sixteen combinations
    pub fn combinations() -> impl Iterator<Item = Self> {
        (0u8..16).map(|bits| Self {
            offset: bits & 1 != 0,
            refraction: bits & 2 != 0,
            polar: bits & 4 != 0,
            dynamic: bits & 8 != 0,
        })
    }
}
