use crate::event::MarkupEvent;

/// Receives markup events in document order, each with its nesting level.
pub trait MarkupHandler {
    fn handle_event(&mut self, level: usize, event: MarkupEvent);
}

/// Drops every event it receives.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl MarkupHandler for Discard {
    fn handle_event(&mut self, _level: usize, _event: MarkupEvent) {}
}

impl MarkupHandler for Vec<(usize, MarkupEvent)> {
    fn handle_event(&mut self, level: usize, event: MarkupEvent) {
        self.push((level, event));
    }
}

impl<H: MarkupHandler + ?Sized> MarkupHandler for &mut H {
    fn handle_event(&mut self, level: usize, event: MarkupEvent) {
        (**self).handle_event(level, event)
    }
}
