#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum PierSide {
    East,
    West,
    Unknown,
}

impl PierSide {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn opposite(self) -> Self {
        match self {
            PierSide::Unknown => self,
            PierSide::East => PierSide::West,
            PierSide::West => PierSide::East,
        }
    }
}
