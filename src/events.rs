//! File-open notifications.
//!
//! Subscribers receive the opened document (or `None` when a view is emptied)
//! together with a mutable context. Every subscription hands back a
//! [`Subscription`] token; dropping the bus or calling
//! [`EventBus::unsubscribe`] ends it.

use crate::errors::AppResult;
use crate::host::DocumentRef;
use tracing::debug;

type FileOpenHandler<C> = Box<dyn FnMut(&mut C, Option<&DocumentRef>) -> AppResult<()>>;

/// Token identifying one subscription.
#[must_use = "keep the subscription to be able to unsubscribe"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Dispatches file-open notifications to subscribers in subscription order.
pub struct EventBus<C> {
    next_id: u64,
    file_open: Vec<(Subscription, FileOpenHandler<C>)>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            next_id: 0,
            file_open: Vec::new(),
        }
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `handler` to file-open notifications.
    pub fn on_file_open<F>(&mut self, handler: F) -> Subscription
    where
        F: FnMut(&mut C, Option<&DocumentRef>) -> AppResult<()> + 'static,
    {
        self.next_id += 1;
        let subscription = Subscription(self.next_id);
        self.file_open.push((subscription, Box::new(handler)));
        debug!("Added file-open subscription {:?}", subscription);
        subscription
    }

    /// Ends a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.file_open.len();
        self.file_open.retain(|(id, _)| *id != subscription);
        before != self.file_open.len()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.file_open.len()
    }

    /// Notifies every subscriber, stopping at the first error.
    pub fn emit_file_open(&mut self, context: &mut C, file: Option<&DocumentRef>) -> AppResult<()> {
        debug!(
            "file-open: {}",
            file.map(DocumentRef::path).unwrap_or("<none>")
        );
        for (_, handler) in self.file_open.iter_mut() {
            handler(&mut *context, file)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_subscribers_in_order() {
        let mut bus: EventBus<Vec<String>> = EventBus::new();
        let _first = bus.on_file_open(|seen, file| {
            seen.push(format!("first:{}", file.map(DocumentRef::path).unwrap_or("-")));
            Ok(())
        });
        let _second = bus.on_file_open(|seen, _| {
            seen.push("second".to_string());
            Ok(())
        });

        let mut seen = Vec::new();
        bus.emit_file_open(&mut seen, Some(&DocumentRef::new("a.md")))
            .unwrap();
        bus.emit_file_open(&mut seen, None).unwrap();

        assert_eq!(seen, vec!["first:a.md", "second", "first:-", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus: EventBus<u32> = EventBus::new();
        let subscription = bus.on_file_open(|count, _| {
            *count += 1;
            Ok(())
        });

        let mut count = 0;
        bus.emit_file_open(&mut count, None).unwrap();
        assert!(bus.unsubscribe(subscription));
        assert!(!bus.unsubscribe(subscription));
        bus.emit_file_open(&mut count, None).unwrap();

        assert_eq!(count, 1);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
