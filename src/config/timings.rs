//! Timing constants and velocity thresholds for the chrome controller.

use super::ConfigError;
use std::time::Duration;

/// Every tunable constant the chrome controller uses.
///
/// Defaults are tuned for touch scrolling where one line is roughly 20 px.
/// All values can be overridden from the `[timings]` table of the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeTimings {
    /// Auto-hide delay when nothing special happened recently.
    pub default_delay: Duration,
    /// Auto-hide delay after a settings sheet was recently closed.
    pub extended_delay: Duration,
    /// Auto-hide delay after search was recently activated.
    pub search_delay: Duration,
    /// Scroll velocity (px/s) above which chrome is hidden immediately.
    pub velocity_threshold_for_hide: f64,
    /// Scroll velocity (px/s) below which an upward scroll may reveal chrome.
    pub velocity_threshold_for_reveal: f64,
    /// Quiet period before a pause-reveal fires.
    pub pause_duration_for_reveal: Duration,
    /// How long a velocity reveal stays on screen.
    pub velocity_reveal_duration: Duration,
    /// Samples closer together than this are dropped.
    pub minimum_sample_interval: Duration,
    /// How long "recently closed settings" / "recently searched" stay set.
    pub recent_activity_window: Duration,
}

impl Default for ChromeTimings {
    fn default() -> Self {
        Self {
            default_delay: Duration::from_secs(4),
            extended_delay: Duration::from_secs(8),
            search_delay: Duration::from_secs(10),
            velocity_threshold_for_hide: 1200.0,
            velocity_threshold_for_reveal: 300.0,
            pause_duration_for_reveal: Duration::from_millis(500),
            velocity_reveal_duration: Duration::from_secs(2),
            minimum_sample_interval: Duration::from_millis(10),
            recent_activity_window: Duration::from_secs(30),
        }
    }
}

impl ChromeTimings {
    /// Check that the thresholds and intervals are usable together.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimings`] when a threshold is negative or
    /// not finite, when the reveal threshold exceeds the hide threshold, or
    /// when the minimum sample interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hide = self.velocity_threshold_for_hide;
        let reveal = self.velocity_threshold_for_reveal;

        if !hide.is_finite() || hide < 0.0 {
            return Err(ConfigError::InvalidTimings(format!(
                "hide velocity threshold must be a non-negative number, got {hide}"
            )));
        }
        if !reveal.is_finite() || reveal < 0.0 {
            return Err(ConfigError::InvalidTimings(format!(
                "reveal velocity threshold must be a non-negative number, got {reveal}"
            )));
        }
        if reveal > hide {
            return Err(ConfigError::InvalidTimings(format!(
                "reveal velocity threshold ({reveal}) exceeds hide threshold ({hide})"
            )));
        }
        if self.minimum_sample_interval.is_zero() {
            return Err(ConfigError::InvalidTimings(
                "minimum sample interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ChromeTimings::default().validate(), Ok(()));
    }

    #[test]
    fn defaults_match_documented_constants() {
        let timings = ChromeTimings::default();
        assert_eq!(timings.search_delay, Duration::from_secs(10));
        assert_eq!(timings.minimum_sample_interval, Duration::from_millis(10));
        assert_eq!(timings.recent_activity_window, Duration::from_secs(30));
        assert!(timings.extended_delay > timings.default_delay);
    }

    #[test]
    fn reveal_above_hide_is_rejected() {
        let timings = ChromeTimings {
            velocity_threshold_for_hide: 100.0,
            velocity_threshold_for_reveal: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            timings.validate(),
            Err(ConfigError::InvalidTimings(_))
        ));
    }

    #[test]
    fn zero_sample_interval_is_rejected() {
        let timings = ChromeTimings {
            minimum_sample_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(timings.validate().is_err());
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let timings = ChromeTimings {
            velocity_threshold_for_hide: f64::NAN,
            ..Default::default()
        };
        assert!(timings.validate().is_err());
    }
}
