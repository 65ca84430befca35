pub mod clock {

    /// Monotonic millisecond counter.
    ///
    /// The counter is allowed to wrap around; every duration in this crate is
    /// computed with [`elapsed_ms`], so a wrap between two readings is harmless
    /// as long as the real gap is below `u32::MAX` milliseconds.
    pub trait Clock {
        fn now_ms(&mut self) -> u32;
    }

    impl<C: Clock + ?Sized> Clock for &mut C {
        fn now_ms(&mut self) -> u32 {
            (**self).now_ms()
        }
    }

    /// Milliseconds from `since_ms` to `now_ms`, modulo 2^32.
    #[inline]
    pub const fn elapsed_ms(now_ms: u32, since_ms: u32) -> u32 {
        now_ms.wrapping_sub(since_ms)
    }

    /// Hand-driven clock for simulated time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SimClock {
        now: u32,
    }

    impl SimClock {
        pub const fn new(start_ms: u32) -> Self {
            SimClock { now: start_ms }
        }

        pub fn advance(&mut self, ms: u32) -> u32 {
            self.now = self.now.wrapping_add(ms);
            self.now
        }

        pub fn set(&mut self, now_ms: u32) {
            self.now = now_ms;
        }
    }

    impl Clock for SimClock {
        fn now_ms(&mut self) -> u32 {
            self.now
        }
    }

    /// Fires once every `period_ms`, polled from the main loop.
    pub struct Interval {
        last_ms: u32,
        period_ms: u32,
    }

    impl Interval {
        pub const fn new(now_ms: u32, period_ms: u32) -> Self {
            Interval {
                last_ms: now_ms,
                period_ms,
            }
        }

        /// True once the period has elapsed; restarts the period from `now_ms`.
        pub fn is_due(&mut self, now_ms: u32) -> bool {
            if elapsed_ms(now_ms, self.last_ms) >= self.period_ms {
                self.last_ms = now_ms;
                true
            } else {
                false
            }
        }
    }

    /// Square wave that is on for the first `width_ms` of every `period_ms`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Pulse {
        period_ms: u32,
        width_ms: u32,
    }

    impl Pulse {
        pub const fn new(period_ms: u32, width_ms: u32) -> Self {
            Pulse {
                period_ms,
                width_ms,
            }
        }

        pub fn is_on(&self, now_ms: u32) -> bool {
            if self.period_ms == 0 {
                return false;
            }
            now_ms % self.period_ms < self.width_ms
        }
    }

}
