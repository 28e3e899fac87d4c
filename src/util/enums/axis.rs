#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Axis {
    /// HA or Az
    Primary,
    /// Dec or Alt
    Secondary,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Primary, Axis::Secondary];
}
