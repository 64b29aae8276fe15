//! Timer modes and their study/break durations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Upper bound accepted for a custom duration field
pub const MAX_CUSTOM_MINUTES: u32 = 24 * 60;

/// Named duration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Focus,
    Deep,
    Custom,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Deep => "deep",
            Mode::Custom => "custom",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(Mode::Focus),
            "deep" => Ok(Mode::Deep),
            "custom" => Ok(Mode::Custom),
            other => Err(TimerError::InvalidInput(format!("unknown mode '{}'", other))),
        }
    }
}

/// Study and break lengths in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub study_minutes: u32,
    pub break_minutes: u32,
}

impl Durations {
    pub const fn new(study_minutes: u32, break_minutes: u32) -> Self {
        Self {
            study_minutes,
            break_minutes,
        }
    }

    pub fn study_seconds(&self) -> u32 {
        self.study_minutes * 60
    }

    pub fn break_seconds(&self) -> u32 {
        self.break_minutes * 60
    }

    /// Longest phase in seconds; bounds the remaining time for this mode
    pub fn max_seconds(&self) -> u32 {
        self.study_seconds().max(self.break_seconds())
    }
}

pub const FOCUS: Durations = Durations::new(25, 5);
pub const DEEP: Durations = Durations::new(50, 10);

/// Duration table; only the custom entry is mutable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModePresets {
    custom: Durations,
}

impl ModePresets {
    pub fn new(custom: Durations) -> Self {
        Self { custom }
    }

    pub fn durations(&self, mode: Mode) -> Durations {
        match mode {
            Mode::Focus => FOCUS,
            Mode::Deep => DEEP,
            Mode::Custom => self.custom,
        }
    }

    pub fn custom(&self) -> Durations {
        self.custom
    }

    /// Apply raw custom field values. Each field that fails to parse keeps
    /// its last valid value and is reported back.
    pub fn update_custom(&mut self, study: Option<&str>, brk: Option<&str>) -> Vec<TimerError> {
        let mut rejected = Vec::new();

        if let Some(raw) = study {
            match parse_minutes(raw) {
                Ok(minutes) => self.custom.study_minutes = minutes,
                Err(e) => rejected.push(e),
            }
        }
        if let Some(raw) = brk {
            match parse_minutes(raw) {
                Ok(minutes) => self.custom.break_minutes = minutes,
                Err(e) => rejected.push(e),
            }
        }

        rejected
    }
}

impl Default for ModePresets {
    fn default() -> Self {
        Self::new(FOCUS)
    }
}

/// Parse a custom duration field as a positive whole number of minutes
pub fn parse_minutes(raw: &str) -> Result<u32, TimerError> {
    let trimmed = raw.trim();
    let minutes: u32 = trimmed
        .parse()
        .map_err(|_| TimerError::InvalidInput(format!("'{}' is not a whole number of minutes", trimmed)))?;

    if minutes == 0 || minutes > MAX_CUSTOM_MINUTES {
        return Err(TimerError::InvalidInput(format!(
            "duration must be between 1 and {} minutes, got {}",
            MAX_CUSTOM_MINUTES, minutes
        )));
    }

    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_fixed_modes() {
        let presets = ModePresets::default();
        assert_eq!(presets.durations(Mode::Focus), Durations::new(25, 5));
        assert_eq!(presets.durations(Mode::Deep), Durations::new(50, 10));
        assert_eq!(presets.durations(Mode::Custom), Durations::new(25, 5));
    }

    #[test]
    fn custom_update_applies_valid_fields() {
        let mut presets = ModePresets::default();
        let rejected = presets.update_custom(Some("45"), Some(" 15 "));
        assert!(rejected.is_empty());
        assert_eq!(presets.custom(), Durations::new(45, 15));
    }

    #[test]
    fn invalid_custom_field_keeps_last_valid_value() {
        let mut presets = ModePresets::new(Durations::new(40, 8));
        let rejected = presets.update_custom(Some("abc"), Some("12"));
        assert_eq!(rejected.len(), 1);
        assert_eq!(presets.custom(), Durations::new(40, 12));

        let rejected = presets.update_custom(Some("0"), Some("-3"));
        assert_eq!(rejected.len(), 2);
        assert_eq!(presets.custom(), Durations::new(40, 12));
    }

    #[test]
    fn parse_minutes_bounds() {
        assert_eq!(parse_minutes("1"), Ok(1));
        assert_eq!(parse_minutes("1440"), Ok(1440));
        assert!(parse_minutes("1441").is_err());
        assert!(parse_minutes("").is_err());
        assert!(parse_minutes("2.5").is_err());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Deep".parse::<Mode>(), Ok(Mode::Deep));
        assert_eq!(" custom".parse::<Mode>(), Ok(Mode::Custom));
        assert!("sprint".parse::<Mode>().is_err());
    }
}
