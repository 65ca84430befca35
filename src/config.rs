pub mod config {

    use crate::error::error::ConfigError;

    pub const DEFAULT_DEBOUNCE_MS: u32 = 50;
    pub const DEFAULT_DOUBLE_CLICK_GAP_MS: u32 = 250;
    pub const DEFAULT_LONG_CLICK_MS: u32 = 300;

    /// Timing thresholds of one button, in milliseconds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct ClickTimings {
        /// Presses shorter than this are contact bounce.
        pub debounce_ms: u32,
        /// Maximum time after the first click in which a second click makes a
        /// double click.
        pub double_click_gap_ms: u32,
        /// Presses longer than this are long clicks.
        pub long_click_ms: u32,
    }

    impl ClickTimings {
        pub const DEFAULT: ClickTimings = ClickTimings::new(
            DEFAULT_DEBOUNCE_MS,
            DEFAULT_DOUBLE_CLICK_GAP_MS,
            DEFAULT_LONG_CLICK_MS,
        );

        pub const fn new(debounce_ms: u32, double_click_gap_ms: u32, long_click_ms: u32) -> Self {
            ClickTimings {
                debounce_ms,
                double_click_gap_ms,
                long_click_ms,
            }
        }

        pub const fn with_debounce_ms(self, debounce_ms: u32) -> Self {
            ClickTimings {
                debounce_ms,
                ..self
            }
        }

        pub const fn with_double_click_gap_ms(self, double_click_gap_ms: u32) -> Self {
            ClickTimings {
                double_click_gap_ms,
                ..self
            }
        }

        pub const fn with_long_click_ms(self, long_click_ms: u32) -> Self {
            ClickTimings {
                long_click_ms,
                ..self
            }
        }

        pub fn validate(&self) -> Result<(), ConfigError> {
            if self.debounce_ms >= self.long_click_ms {
                return Err(ConfigError::DebounceNotBelowLongClick {
                    debounce_ms: self.debounce_ms,
                    long_click_ms: self.long_click_ms,
                });
            }
            if self.double_click_gap_ms == 0 {
                return Err(ConfigError::ZeroDoubleClickGap);
            }
            Ok(())
        }
    }

    impl Default for ClickTimings {
        fn default() -> Self {
            ClickTimings::DEFAULT
        }
    }

}
