use std::collections::VecDeque;

/// Source of submitted user text, polled once per interaction cycle.
pub trait InputSource {
    /// Returns newly submitted text, or `None` when nothing was submitted.
    fn poll_input(&mut self) -> Option<String>;
}

impl InputSource for VecDeque<String> {
    fn poll_input(&mut self) -> Option<String> {
        self.pop_front()
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll_input(&mut self) -> Option<String> {
        (**self).poll_input()
    }
}
