pub mod event {

    use heapless::Deque;

    /// Gesture reported by the classifier, at most one per poll.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum ClickEvent {
        Click,
        LongClick,
        DoubleClick,
    }

    /// Receiver of classified events, called synchronously from the poll.
    pub trait EventSink {
        fn notify(&mut self, event: ClickEvent);
    }

    impl<F> EventSink for F
    where
        F: FnMut(ClickEvent),
    {
        fn notify(&mut self, event: ClickEvent) {
            self(event)
        }
    }

    /// One callback per gesture, bound at construction.
    pub struct Callbacks<C, L, D> {
        on_click: C,
        on_long_click: L,
        on_double_click: D,
    }

    impl<C, L, D> Callbacks<C, L, D>
    where
        C: FnMut(),
        L: FnMut(),
        D: FnMut(),
    {
        pub fn new(on_click: C, on_long_click: L, on_double_click: D) -> Self {
            Callbacks {
                on_click,
                on_long_click,
                on_double_click,
            }
        }
    }

    impl<C, L, D> EventSink for Callbacks<C, L, D>
    where
        C: FnMut(),
        L: FnMut(),
        D: FnMut(),
    {
        fn notify(&mut self, event: ClickEvent) {
            match event {
                ClickEvent::Click => (self.on_click)(),
                ClickEvent::LongClick => (self.on_long_click)(),
                ClickEvent::DoubleClick => (self.on_double_click)(),
            }
        }
    }

    /// Bounded FIFO of events for consumers that drain them later in the loop.
    ///
    /// When full the oldest event is discarded to make room for the newest.
    pub struct EventQueue<const N: usize> {
        events: Deque<ClickEvent, N>,
        dropped: u32,
    }

    impl<const N: usize> EventQueue<N> {
        pub const fn new() -> Self {
            EventQueue {
                events: Deque::new(),
                dropped: 0,
            }
        }

        pub fn pop(&mut self) -> Option<ClickEvent> {
            self.events.pop_front()
        }

        pub fn len(&self) -> usize {
            self.events.len()
        }

        pub fn is_empty(&self) -> bool {
            self.events.is_empty()
        }

        /// Number of events lost to overflow since creation.
        pub fn dropped(&self) -> u32 {
            self.dropped
        }
    }

    impl<const N: usize> Default for EventQueue<N> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<const N: usize> EventSink for EventQueue<N> {
        fn notify(&mut self, event: ClickEvent) {
            if let Err(event) = self.events.push_back(event) {
                if let Some(lost) = self.events.pop_front() {
                    warn!("event queue full, dropping {}", lost);
                }
                self.dropped = self.dropped.wrapping_add(1);
                let _ = self.events.push_back(event);
            }
        }
    }

}
