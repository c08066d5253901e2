//! Engine configuration.
//!
//! The conversions themselves have nothing to tune; only the notion of
//! "today" depends on where the clock is read.

use crate::clock::SystemClock;
use crate::error::{Error, Result};

/// Environment variable read by [`Config::from_env`].
pub const ENV_UTC_OFFSET_MINUTES: &str = "NONGLI_UTC_OFFSET_MINUTES";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    /// Minutes east of UTC used to decide the current date. Defaults to
    /// `480` (Beijing time).
    pub utc_offset_minutes: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 480,
        }
    }
}

impl Config {
    /// Reads [`ENV_UTC_OFFSET_MINUTES`], falling back to defaults when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// ```
    /// use nongli::Config;
    ///
    /// let config = Config::from_lookup(|_| Some("-300".to_owned())).unwrap();
    /// assert_eq!(-300, config.utc_offset_minutes);
    /// assert!(Config::from_lookup(|_| Some("UTC+8".to_owned())).is_err());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_UTC_OFFSET_MINUTES) {
            config.utc_offset_minutes = raw.trim().parse().map_err(|e| {
                Error::Config(format!("{ENV_UTC_OFFSET_MINUTES}={raw:?}: {e}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.clock().map(|_| ())
    }

    /// Wall clock observing this config's UTC offset.
    pub fn clock(&self) -> Result<SystemClock> {
        SystemClock::new(self.utc_offset_minutes).ok_or_else(|| {
            Error::Config(format!(
                "utc offset {} minutes is not within one day",
                self.utc_offset_minutes
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Ok(Config::default()), Config::from_lookup(|_| None));
        assert_eq!(480, Config::default().clock().unwrap().utc_offset_minutes());
    }

    #[test]
    fn parses_offsets() {
        for (raw, expected) in [("0", 0), (" 540 ", 540), ("-720", -720)] {
            let config = Config::from_lookup(|_| Some(raw.to_owned())).unwrap();
            assert_eq!(expected, config.utc_offset_minutes, "{raw:?}");
        }
    }

    #[test]
    fn rejects_bad_offsets() {
        for raw in ["", "eight", "1440", "-1440", "99999999999"] {
            assert!(
                matches!(Config::from_lookup(|_| Some(raw.to_owned())), Err(Error::Config(_))),
                "{raw:?}"
            );
        }
    }
}
