pub mod button {

    use embedded_hal::digital::InputPin;

    use crate::clock::clock::{elapsed_ms, Clock};
    use crate::config::config::ClickTimings;
    use crate::error::error::ConfigError;
    use crate::event::event::{ClickEvent, EventSink};

    /// Where the button is within a gesture.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum ButtonState {
        /// Released, nothing waiting to be reported.
        Idle,
        /// Held down. A click may still be pending from before this press.
        Pressed,
        /// Released after a click that is not yet known to be single or double.
        ClickPending,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct PendingClick {
        first_click_ms: u32,
        count: u8,
    }

    /// Debounced, active-low pushbutton that classifies clicks.
    ///
    /// The pin idles HIGH through a pull-up and reads LOW while pressed.
    /// Call [`poll`](Self::poll) from the main loop, ideally every 10 ms or
    /// faster, so no edge is missed.
    pub struct DebouncedButton<P> {
        pin: P,
        timings: ClickTimings,
        prev_pressed: bool,
        pressed: bool,
        press_start_ms: u32,
        pending: Option<PendingClick>,
    }

    impl<P: InputPin> DebouncedButton<P> {
        pub fn new(pin: P, timings: ClickTimings) -> Result<Self, ConfigError> {
            timings.validate()?;
            Ok(Self::build(pin, timings))
        }

        /// 50 ms debounce, 250 ms double click gap, 300 ms long click.
        pub fn with_default_timings(pin: P) -> Self {
            Self::build(pin, ClickTimings::DEFAULT)
        }

        fn build(pin: P, timings: ClickTimings) -> Self {
            DebouncedButton {
                pin,
                timings,
                prev_pressed: false,
                pressed: false,
                press_start_ms: 0,
                pending: None,
            }
        }

        /// Samples the pin once and returns the gesture completed by this
        /// sample, if any.
        ///
        /// A long click is reported on the poll that sees the release. A single
        /// click is only reported once the double click gap has passed without
        /// a second click, and a double click on the first steady poll after
        /// the second release. Pin errors are returned untouched and leave the
        /// classifier as it was.
        pub fn poll(&mut self, now_ms: u32) -> Result<Option<ClickEvent>, P::Error> {
            let pressed = self.pin.is_low()?;
            self.prev_pressed = self.pressed;
            self.pressed = pressed;

            let event = match (self.prev_pressed, self.pressed) {
                (false, true) => {
                    trace!("press at {}", now_ms);
                    self.press_start_ms = now_ms;
                    None
                }
                (true, false) => self.on_release(now_ms),
                _ => self.resolve_pending(now_ms),
            };
            Ok(event)
        }

        pub fn poll_clock<C: Clock>(
            &mut self,
            clock: &mut C,
        ) -> Result<Option<ClickEvent>, P::Error> {
            let now_ms = clock.now_ms();
            self.poll(now_ms)
        }

        /// [`poll`](Self::poll) that also hands the event to `sink`.
        pub fn poll_notify<S: EventSink>(
            &mut self,
            now_ms: u32,
            sink: &mut S,
        ) -> Result<Option<ClickEvent>, P::Error> {
            let event = self.poll(now_ms)?;
            if let Some(event) = event {
                sink.notify(event);
            }
            Ok(event)
        }

        fn on_release(&mut self, now_ms: u32) -> Option<ClickEvent> {
            let held_ms = elapsed_ms(now_ms, self.press_start_ms);
            if held_ms < self.timings.debounce_ms {
                trace!("bounce, held {} ms", held_ms);
                return None;
            }
            if held_ms > self.timings.long_click_ms {
                // pending clicks are left alone and resolve on their own
                debug!("long click, held {} ms", held_ms);
                return Some(ClickEvent::LongClick);
            }
            match self.pending.as_mut() {
                Some(pending) => pending.count = pending.count.saturating_add(1),
                None => {
                    self.pending = Some(PendingClick {
                        first_click_ms: now_ms,
                        count: 1,
                    })
                }
            }
            trace!("click, held {} ms, {} pending", held_ms, self.pending_clicks());
            None
        }

        fn resolve_pending(&mut self, now_ms: u32) -> Option<ClickEvent> {
            let pending = self.pending?;
            if pending.count > 1 {
                self.pending = None;
                debug!("double click");
                return Some(ClickEvent::DoubleClick);
            }
            if elapsed_ms(now_ms, pending.first_click_ms) > self.timings.double_click_gap_ms {
                self.pending = None;
                debug!("click");
                return Some(ClickEvent::Click);
            }
            None
        }

        pub fn state(&self) -> ButtonState {
            if self.pressed {
                ButtonState::Pressed
            } else if self.pending.is_some() {
                ButtonState::ClickPending
            } else {
                ButtonState::Idle
            }
        }

        /// Qualifying clicks seen but not yet reported.
        pub fn pending_clicks(&self) -> u8 {
            self.pending.map_or(0, |pending| pending.count)
        }

        pub fn is_pressed(&self) -> bool {
            self.pressed
        }

        pub fn timings(&self) -> &ClickTimings {
            &self.timings
        }

        pub fn release(self) -> P {
            self.pin
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::clock::clock::SimClock;
        use crate::event::event::{Callbacks, EventQueue};
        use crate::level::level::{LevelFn, TryLevelFn};
        use core::cell::Cell;
        use embedded_hal::digital::{Error, ErrorKind};
        use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
        use std::vec::Vec;

        const POLL_PERIOD_MS: u32 = 5;

        /// Polls every 5 ms from `base` to `base + until`. `steps` lists the
        /// offsets at which the button goes down (`true`) or up (`false`).
        /// Returns the events with the offset of the poll that produced them.
        fn run_from(
            base: u32,
            timings: ClickTimings,
            steps: &[(u32, bool)],
            until: u32,
        ) -> Vec<(u32, ClickEvent)> {
            let level = Cell::new(true);
            let mut button = DebouncedButton::new(LevelFn::new(|| level.get()), timings).unwrap();
            let mut events = Vec::new();
            let mut offset = 0;
            while offset <= until {
                let pressed = steps
                    .iter()
                    .rev()
                    .find(|(at, _)| *at <= offset)
                    .map_or(false, |(_, pressed)| *pressed);
                level.set(!pressed);
                if let Some(event) = button.poll(base.wrapping_add(offset)).unwrap() {
                    events.push((offset, event));
                }
                offset += POLL_PERIOD_MS;
            }
            events
        }

        fn run(steps: &[(u32, bool)], until: u32) -> Vec<(u32, ClickEvent)> {
            run_from(0, ClickTimings::default(), steps, until)
        }

        #[derive(Debug, PartialEq)]
        struct ReadFault;

        impl Error for ReadFault {
            fn kind(&self) -> ErrorKind {
                ErrorKind::Other
            }
        }

        #[test]
        fn invalid_timings_are_rejected() {
            let pin = LevelFn::new(|| true);
            let result = DebouncedButton::new(pin, ClickTimings::new(300, 250, 300));
            assert!(matches!(
                result,
                Err(ConfigError::DebounceNotBelowLongClick { .. })
            ));
            let pin = LevelFn::new(|| true);
            let result = DebouncedButton::new(pin, ClickTimings::new(50, 0, 300));
            assert!(matches!(result, Err(ConfigError::ZeroDoubleClickGap)));
        }

        #[test]
        fn idle_button_reports_nothing() {
            assert!(run(&[], 2_000).is_empty());
        }

        #[test]
        fn single_click_waits_for_the_gap() {
            let events = run(&[(0, true), (100, false)], 2_000);
            // first poll with more than 250 ms since the release at 100
            assert_eq!(events, [(355, ClickEvent::Click)]);
        }

        #[test]
        fn single_click_is_not_reported_at_release() {
            let level = Cell::new(false);
            let mut button = DebouncedButton::with_default_timings(LevelFn::new(|| level.get()));
            assert_eq!(button.poll(0), Ok(None));
            level.set(true);
            assert_eq!(button.poll(100), Ok(None));
            assert_eq!(button.state(), ButtonState::ClickPending);
            assert_eq!(button.pending_clicks(), 1);
            assert_eq!(button.poll(350), Ok(None));
            assert_eq!(button.poll(351), Ok(Some(ClickEvent::Click)));
            assert_eq!(button.state(), ButtonState::Idle);
            assert_eq!(button.pending_clicks(), 0);
        }

        #[test]
        fn double_click_reported_right_after_second_release() {
            let events = run(&[(0, true), (100, false), (150, true), (220, false)], 2_000);
            assert_eq!(events, [(225, ClickEvent::DoubleClick)]);
        }

        #[test]
        fn bounce_is_ignored() {
            let level = Cell::new(false);
            let mut button = DebouncedButton::with_default_timings(LevelFn::new(|| level.get()));
            assert_eq!(button.poll(0), Ok(None));
            assert_eq!(button.state(), ButtonState::Pressed);
            level.set(true);
            assert_eq!(button.poll(30), Ok(None));
            assert_eq!(button.state(), ButtonState::Idle);
            assert_eq!(button.pending_clicks(), 0);
            for now in (35..2_000).step_by(5) {
                assert_eq!(button.poll(now), Ok(None));
            }
        }

        #[test]
        fn bounce_leaves_pending_click_untouched() {
            let events = run(&[(0, true), (100, false), (200, true), (220, false)], 2_000);
            assert_eq!(events, [(355, ClickEvent::Click)]);
        }

        #[test]
        fn debounce_boundary_counts_as_click() {
            let events = run(&[(0, true), (50, false)], 1_000);
            assert_eq!(events, [(305, ClickEvent::Click)]);
        }

        #[test]
        fn long_click_threshold_is_exclusive() {
            let events = run(&[(0, true), (300, false)], 1_000);
            assert_eq!(events, [(555, ClickEvent::Click)]);
            let events = run(&[(0, true), (305, false)], 1_000);
            assert_eq!(events, [(305, ClickEvent::LongClick)]);
        }

        #[test]
        fn long_click_reported_at_release() {
            let events = run(&[(0, true), (400, false)], 2_000);
            assert_eq!(events, [(400, ClickEvent::LongClick)]);
        }

        #[test]
        fn long_click_keeps_pending_click() {
            let timings = ClickTimings::default().with_double_click_gap_ms(1_000);
            let level = Cell::new(true);
            let mut button = DebouncedButton::new(LevelFn::new(|| level.get()), timings).unwrap();
            level.set(false);
            assert_eq!(button.poll(0), Ok(None));
            level.set(true);
            assert_eq!(button.poll(100), Ok(None));
            level.set(false);
            assert_eq!(button.poll(150), Ok(None));
            level.set(true);
            assert_eq!(button.poll(500), Ok(Some(ClickEvent::LongClick)));
            assert_eq!(button.pending_clicks(), 1);
            assert_eq!(button.state(), ButtonState::ClickPending);

            let events = run_from(
                0,
                timings,
                &[(0, true), (100, false), (150, true), (500, false)],
                3_000,
            );
            assert_eq!(
                events,
                [(500, ClickEvent::LongClick), (1_105, ClickEvent::Click)]
            );
        }

        #[test]
        fn pending_click_resolves_while_held() {
            let events = run(&[(0, true), (100, false), (150, true), (600, false)], 2_000);
            assert_eq!(
                events,
                [(355, ClickEvent::Click), (600, ClickEvent::LongClick)]
            );
        }

        #[test]
        fn each_gesture_reported_once() {
            let events = run(
                &[
                    (0, true),
                    (100, false),
                    (1_000, true),
                    (1_080, false),
                    (1_150, true),
                    (1_230, false),
                    (2_000, true),
                    (2_500, false),
                ],
                10_000,
            );
            assert_eq!(
                events,
                [
                    (355, ClickEvent::Click),
                    (1_235, ClickEvent::DoubleClick),
                    (2_500, ClickEvent::LongClick),
                ]
            );
        }

        #[test]
        fn timing_survives_counter_wrap() {
            let base = u32::MAX - 40;
            let timings = ClickTimings::default();
            let events = run_from(base, timings, &[(0, true), (100, false)], 1_000);
            assert_eq!(events, [(355, ClickEvent::Click)]);
            let events = run_from(base, timings, &[(0, true), (30, false)], 1_000);
            assert!(events.is_empty());
            let events = run_from(base, timings, &[(0, true), (400, false)], 1_000);
            assert_eq!(events, [(400, ClickEvent::LongClick)]);
            let events = run_from(
                base,
                timings,
                &[(0, true), (100, false), (150, true), (220, false)],
                1_000,
            );
            assert_eq!(events, [(225, ClickEvent::DoubleClick)]);
        }

        #[test]
        fn reader_failure_propagates_and_keeps_state() {
            let fail = Cell::new(false);
            let level = Cell::new(false);
            let pin = TryLevelFn::new(|| {
                if fail.get() {
                    Err(ReadFault)
                } else {
                    Ok(level.get())
                }
            });
            let mut button = DebouncedButton::with_default_timings(pin);
            assert_eq!(button.poll(0), Ok(None));
            fail.set(true);
            assert_eq!(button.poll(5), Err(ReadFault));
            assert_eq!(button.state(), ButtonState::Pressed);
            fail.set(false);
            level.set(true);
            assert_eq!(button.poll(100), Ok(None));
            assert_eq!(button.pending_clicks(), 1);
        }

        #[test]
        fn poll_notify_feeds_the_sink() {
            let level = Cell::new(false);
            let mut button = DebouncedButton::with_default_timings(LevelFn::new(|| level.get()));
            let mut queue: EventQueue<4> = EventQueue::new();
            button.poll_notify(0, &mut queue).unwrap();
            level.set(true);
            button.poll_notify(500, &mut queue).unwrap();
            assert_eq!(queue.pop(), Some(ClickEvent::LongClick));
            assert!(queue.is_empty());

            let doubles = Cell::new(0);
            let mut callbacks = Callbacks::new(|| {}, || {}, || doubles.set(doubles.get() + 1));
            for (now, high) in [(1_000, false), (1_080, true), (1_120, false), (1_200, true)] {
                level.set(high);
                button.poll_notify(now, &mut callbacks).unwrap();
            }
            let event = button.poll_notify(1_205, &mut callbacks).unwrap();
            assert_eq!(event, Some(ClickEvent::DoubleClick));
            assert_eq!(doubles.get(), 1);
        }

        #[test]
        fn poll_clock_reads_the_clock() {
            let level = Cell::new(false);
            let mut button = DebouncedButton::with_default_timings(LevelFn::new(|| level.get()));
            let mut clock = SimClock::new(1_000);
            assert_eq!(button.poll_clock(&mut clock), Ok(None));
            clock.advance(120);
            level.set(true);
            assert_eq!(button.poll_clock(&mut clock), Ok(None));
            clock.advance(251);
            assert_eq!(button.poll_clock(&mut clock), Ok(Some(ClickEvent::Click)));
        }

        #[test]
        fn third_click_before_resolution_is_one_double_click() {
            let level = Cell::new(true);
            let mut button = DebouncedButton::with_default_timings(LevelFn::new(|| level.get()));
            let mut events = Vec::new();
            for (now, high) in [
                (0, false),
                (100, true),
                (150, false),
                (220, true),
                (225, false),
                (300, true),
            ] {
                level.set(high);
                if let Some(event) = button.poll(now).unwrap() {
                    events.push((now, event));
                }
            }
            assert_eq!(button.pending_clicks(), 3);
            for now in [305, 310, 900] {
                if let Some(event) = button.poll(now).unwrap() {
                    events.push((now, event));
                }
            }
            assert_eq!(events, [(305, ClickEvent::DoubleClick)]);
            assert_eq!(button.pending_clicks(), 0);
            assert_eq!(button.state(), ButtonState::Idle);
        }

        #[test]
        fn mock_pin_sequence() {
            let expectations = [
                Transaction::get(State::High),
                Transaction::get(State::Low),
                Transaction::get(State::Low),
                Transaction::get(State::High),
                Transaction::get(State::High),
            ];
            let mut pin = PinMock::new(&expectations);

            let mut button = DebouncedButton::with_default_timings(&mut pin);
            assert_eq!(button.poll(0).unwrap(), None);
            assert_eq!(button.poll(10).unwrap(), None);
            assert!(button.is_pressed());
            assert_eq!(button.poll(20).unwrap(), None);
            assert_eq!(button.poll(90).unwrap(), None);
            assert_eq!(button.pending_clicks(), 1);
            assert_eq!(button.poll(400).unwrap(), Some(ClickEvent::Click));

            button.release().done();
        }
    }
}
