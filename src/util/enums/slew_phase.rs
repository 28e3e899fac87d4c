/// Lifecycle of a GoTo, owned by the session
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub enum SlewPhase {
    #[default]
    Idle,
    /// Moving straight to the target
    DirectSegment,
    /// Moving to the switch position before the direct segment
    DetourSegment,
}

impl SlewPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
