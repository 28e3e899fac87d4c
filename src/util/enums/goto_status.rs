use crate::{Degrees, Hours};

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum GotoStatus {
    InProgress,
    Arrived,
    /// The slew completed but the final position missed the target
    ArrivedOutOfTolerance { ra_error: Hours, dec_error: Degrees },
}

impl GotoStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}
