pub mod level {

    use core::convert::Infallible;
    use core::marker::PhantomData;

    use embedded_hal::digital::{Error, ErrorType, InputPin};

    /// Turns a plain level function into an [`InputPin`].
    ///
    /// The function returns the raw level, `true` meaning HIGH.
    pub struct LevelFn<F> {
        read: F,
    }

    impl<F> LevelFn<F>
    where
        F: FnMut() -> bool,
    {
        pub fn new(read: F) -> Self {
            LevelFn { read }
        }
    }

    impl<F> ErrorType for LevelFn<F> {
        type Error = Infallible;
    }

    impl<F> InputPin for LevelFn<F>
    where
        F: FnMut() -> bool,
    {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok((self.read)())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!(self.read)())
        }
    }

    /// Like [`LevelFn`] for readers that can fail. Errors pass through as-is.
    pub struct TryLevelFn<F, E> {
        read: F,
        _error: PhantomData<E>,
    }

    impl<F, E> TryLevelFn<F, E>
    where
        F: FnMut() -> Result<bool, E>,
        E: Error,
    {
        pub fn new(read: F) -> Self {
            TryLevelFn {
                read,
                _error: PhantomData,
            }
        }
    }

    impl<F, E: Error> ErrorType for TryLevelFn<F, E> {
        type Error = E;
    }

    impl<F, E> InputPin for TryLevelFn<F, E>
    where
        F: FnMut() -> Result<bool, E>,
        E: Error,
    {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            (self.read)()
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            (self.read)().map(|high| !high)
        }
    }

}
