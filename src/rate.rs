//! Attack rate: frequency per period
//!
//! A [`Rate`] of `{ freq: 50, per: 1s }` paces one hit every 20ms. Rates
//! parse from the `"N"` / `"N/duration"` expression form used on command
//! lines (`"50"`, `"50/1s"`, `"100/m"`).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Error, Result};

/// Hit frequency over a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Hits per period
    pub freq: u64,

    /// Period the frequency applies to
    pub per: Duration,
}

impl Rate {
    /// Rate of `freq` hits per second
    pub fn per_second(freq: u64) -> Self {
        Self {
            freq,
            per: Duration::from_secs(1),
        }
    }

    /// Target interval between consecutive hits
    ///
    /// Integer nanosecond division; the truncated remainder makes the
    /// realized hit count of a run slightly lower than the ideal
    /// rate × duration product.
    pub fn interval(&self) -> Duration {
        if self.freq == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos((self.per.as_nanos() / u128::from(self.freq)) as u64)
    }

    /// Reject rates that cannot pace a run
    ///
    /// Must hold before a dispatcher starts: `freq >= 1`, `per > 0`, and an
    /// interval that does not truncate to zero nanoseconds.
    pub fn validate(&self) -> Result<()> {
        if self.freq == 0 {
            return Err(Error::invalid_rate("frequency must be at least 1"));
        }
        if self.per.is_zero() {
            return Err(Error::invalid_rate("period must be positive"));
        }
        if self.interval().is_zero() {
            return Err(Error::invalid_rate(format!(
                "interval of {self} truncates to zero nanoseconds"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.freq, humantime::format_duration(self.per))
    }
}

/// Rate expression parse errors
#[derive(Debug, Error)]
pub enum ParseRateError {
    /// Frequency component is not a positive integer
    #[error("invalid frequency {0:?}: {1}")]
    Frequency(String, #[source] std::num::ParseIntError),

    /// Period component is not a parseable duration
    #[error("invalid period {0:?}: {1}")]
    Period(String, #[source] humantime::DurationError),
}

impl FromStr for Rate {
    type Err = ParseRateError;

    /// Parse `"N"` or `"N/duration"`
    ///
    /// A missing period defaults to one second; a bare unit suffix is read
    /// as one of that unit (`"10/s"` means `"10/1s"`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (freq_part, per_part) = match s.split_once('/') {
            Some((freq, per)) => (freq, per),
            None => (s, "1s"),
        };

        let freq = freq_part
            .parse::<u64>()
            .map_err(|e| ParseRateError::Frequency(freq_part.to_string(), e))?;

        let per_part = match per_part {
            "ns" | "us" | "µs" | "ms" | "s" | "m" | "h" => format!("1{per_part}"),
            _ => per_part.to_string(),
        };
        // humantime spells microseconds "us"
        let per_part = per_part.replace("µs", "us");

        let per = humantime::parse_duration(&per_part)
            .map_err(|e| ParseRateError::Period(per_part.clone(), e))?;

        Ok(Rate { freq, per })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank() {
        assert!("".parse::<Rate>().is_err());
    }

    #[test]
    fn test_parse_bare_frequency_defaults_to_one_second() {
        let rate: Rate = "10".parse().unwrap();
        assert_eq!(rate.freq, 10);
        assert_eq!(rate.per, Duration::from_secs(1));
    }

    #[test]
    fn test_parse_unit_suffix_period() {
        let rate: Rate = "1000/m".parse().unwrap();
        assert_eq!(rate.freq, 1000);
        assert_eq!(rate.per, Duration::from_secs(60));
    }

    #[test]
    fn test_parse_full_period() {
        let rate: Rate = "1000/2m".parse().unwrap();
        assert_eq!(rate.freq, 1000);
        assert_eq!(rate.per, Duration::from_secs(120));
    }

    #[test]
    fn test_parse_millisecond_period() {
        let rate: Rate = "5/500ms".parse().unwrap();
        assert_eq!(rate.freq, 5);
        assert_eq!(rate.per, Duration::from_millis(500));
    }

    #[test]
    fn test_parse_bad_frequency() {
        let err = "abc/1s".parse::<Rate>().unwrap_err();
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_parse_bad_period() {
        let err = "10/xyz".parse::<Rate>().unwrap_err();
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_display() {
        let rate = Rate::per_second(100);
        assert_eq!(rate.to_string(), "100/1s");
    }

    #[test]
    fn test_interval_truncates() {
        let rate = Rate::per_second(7);
        assert_eq!(rate.interval(), Duration::from_nanos(142_857_142));
    }

    #[test]
    fn test_validate_rejects_zero_frequency() {
        let rate = Rate {
            freq: 0,
            per: Duration::from_secs(1),
        };
        assert!(rate.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_period() {
        let rate = Rate {
            freq: 1,
            per: Duration::ZERO,
        };
        assert!(rate.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        // 2e9 hits per second truncates below one nanosecond
        let rate = Rate::per_second(2_000_000_000);
        assert!(rate.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_ordinary_rates() {
        assert!(Rate::per_second(10).validate().is_ok());
        assert!("30/500ms".parse::<Rate>().unwrap().validate().is_ok());
    }
}
