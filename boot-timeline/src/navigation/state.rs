//! Navigation state and transition causes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current position and auto-play status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    /// Current stage index, always within the catalog bounds.
    pub current_index: usize,
    /// Whether an auto-play timer is running.
    pub autoplay_active: bool,
}

/// Why a transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCause {
    /// The first render of a session.
    Initial,
    /// An explicit jump, next or previous.
    User,
    /// An auto-play tick.
    AutoPlay,
    /// A re-render of the current stage (e.g. after a resize).
    Refresh,
    /// A full reset back to the first stage.
    Reset,
}

impl TransitionCause {
    /// Whether this transition cancels a running auto-play.
    #[must_use]
    pub const fn cancels_autoplay(self) -> bool {
        matches!(self, Self::User | Self::Reset)
    }
}

impl fmt::Display for TransitionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::User => write!(f, "user"),
            Self::AutoPlay => write!(f, "autoplay"),
            Self::Refresh => write!(f, "refresh"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_explicit_navigation_cancels_autoplay() {
        assert!(TransitionCause::User.cancels_autoplay());
        assert!(TransitionCause::Reset.cancels_autoplay());
        assert!(!TransitionCause::AutoPlay.cancels_autoplay());
        assert!(!TransitionCause::Refresh.cancels_autoplay());
        assert!(!TransitionCause::Initial.cancels_autoplay());
    }

    #[test]
    fn test_default_state() {
        let state = NavigationState::default();
        assert_eq!(state.current_index, 0);
        assert!(!state.autoplay_active);
    }
}
