pub mod shared {

    use core::cell::RefCell;

    use critical_section::Mutex;
    use embedded_hal::digital::InputPin;

    use crate::button::button::DebouncedButton;
    use crate::event::event::ClickEvent;

    /// A classifier behind a critical-section lock, for a `static` that is
    /// polled from interrupt handlers or shared between execution contexts.
    ///
    /// ```ignore
    /// static BUTTON: SharedButton<ButtonPin> = SharedButton::new();
    ///
    /// BUTTON.install(DebouncedButton::with_default_timings(pin));
    /// // in the timer interrupt:
    /// if let Ok(Some(event)) = BUTTON.poll(now_ms) { ... }
    /// ```
    pub struct SharedButton<P> {
        inner: Mutex<RefCell<Option<DebouncedButton<P>>>>,
    }

    impl<P> SharedButton<P> {
        pub const fn new() -> Self {
            SharedButton {
                inner: Mutex::new(RefCell::new(None)),
            }
        }

        /// Stores `button`, handing back any classifier installed before.
        pub fn install(&self, button: DebouncedButton<P>) -> Option<DebouncedButton<P>> {
            critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(button))
        }

        pub fn take(&self) -> Option<DebouncedButton<P>> {
            critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
        }

        pub fn is_installed(&self) -> bool {
            critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
        }

        /// Runs `f` on the installed classifier while holding the lock.
        pub fn with<R>(&self, f: impl FnOnce(&mut DebouncedButton<P>) -> R) -> Option<R> {
            critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
        }
    }

    impl<P: InputPin> SharedButton<P> {
        // nothing installed, nothing to report
        pub fn poll(&self, now_ms: u32) -> Result<Option<ClickEvent>, P::Error> {
            self.with(|button| button.poll(now_ms)).unwrap_or(Ok(None))
        }
    }

    impl<P> Default for SharedButton<P> {
        fn default() -> Self {
            Self::new()
        }
    }

}
