/// Playback-related types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repeat mode for queue playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Play through the queue once and stop at the end
    #[default]
    Off,
    /// Wrap around to the first item after the last
    All,
    /// Restart the current item when it finishes
    One,
}

impl RepeatMode {
    /// Get the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        }
    }

    /// Parse from a string representation
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "off" => Some(RepeatMode::Off),
            "all" => Some(RepeatMode::All),
            "one" => Some(RepeatMode::One),
            _ => None,
        }
    }

    /// Advance to the next mode in the cycle off -> all -> one -> off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mode_default_is_off() {
        assert_eq!(RepeatMode::default(), RepeatMode::Off);
    }

    #[test]
    fn repeat_mode_string_round_trip() {
        for mode in [RepeatMode::Off, RepeatMode::All, RepeatMode::One] {
            assert_eq!(RepeatMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(RepeatMode::from_str("bogus"), None);
    }

    #[test]
    fn repeat_mode_cycle_returns_after_three_steps() {
        let start = RepeatMode::Off;
        assert_eq!(start.cycle(), RepeatMode::All);
        assert_eq!(start.cycle().cycle(), RepeatMode::One);
        assert_eq!(start.cycle().cycle().cycle(), start);
    }

    #[test]
    fn repeat_mode_serializes_lowercase() {
        let json = serde_json::to_string(&RepeatMode::All).unwrap();
        assert_eq!(json, "\"all\"");
    }
}
