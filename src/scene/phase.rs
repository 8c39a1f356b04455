//! The three-phase life of the card.

/// Scene phase. Strictly forward: `Idle` to `Ascending` on activation,
/// `Ascending` to `Revealed` when the banner tops out. `Revealed` is
/// terminal; the finale loops there forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// Quiescent card waiting for the activation click
    Idle,
    /// Balloons rising, flowers opening, windows blinking
    Ascending,
    /// Banner frozen at the building top, fireworks running
    Revealed,
}

impl ScenePhase {
    /// Stable lowercase name for hosts and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ScenePhase::Idle => "idle",
            ScenePhase::Ascending => "ascending",
            ScenePhase::Revealed => "revealed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names_are_stable() {
        assert_eq!(ScenePhase::Idle.name(), "idle");
        assert_eq!(ScenePhase::Ascending.name(), "ascending");
        assert_eq!(ScenePhase::Revealed.name(), "revealed");
    }
}
