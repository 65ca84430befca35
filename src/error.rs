pub mod error {

    use core::fmt;

    /// Rejected click timings.
    ///
    /// Returned by [`ClickTimings::validate`](crate::ClickTimings::validate) and
    /// [`DebouncedButton::new`](crate::DebouncedButton::new) before a classifier
    /// can be used. Pin read failures are not wrapped here, `poll` hands the
    /// pin's own error back unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum ConfigError {
        /// A press that outlasts the debounce window must still be able to be
        /// shorter than a long click.
        DebounceNotBelowLongClick { debounce_ms: u32, long_click_ms: u32 },
        /// A zero gap would confirm every click before a second one can arrive.
        ZeroDoubleClickGap,
    }

    impl fmt::Display for ConfigError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ConfigError::DebounceNotBelowLongClick {
                    debounce_ms,
                    long_click_ms,
                } => write!(
                    f,
                    "debounce window ({} ms) must be shorter than long click threshold ({} ms)",
                    debounce_ms, long_click_ms
                ),
                ConfigError::ZeroDoubleClickGap => {
                    write!(f, "double click gap must be greater than 0 ms")
                }
            }
        }
    }
}
