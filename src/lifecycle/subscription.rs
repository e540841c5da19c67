use std::collections::HashMap;

/// Host events the visualization listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Resize,
    Unload,
}

/// Registration of one listener; hand it back to [`EventRegistry::unsubscribe`]
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "a subscription must be unsubscribed to stop receiving the event"]
pub struct Subscription {
    id: u64,
    event: HostEvent,
}

impl Subscription {
    pub fn event(&self) -> HostEvent {
        self.event
    }
}

/// Listener registrations for host events.
///
/// The host only routes an event to the visualization while at least one
/// subscription for it is live, so teardown that unsubscribes everything
/// leaves no dangling callbacks behind.
#[derive(Debug, Default)]
pub struct EventRegistry {
    next_id: u64,
    active: HashMap<u64, HostEvent>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, event: HostEvent) -> Subscription {
        self.next_id += 1;
        self.active.insert(self.next_id, event);
        Subscription {
            id: self.next_id,
            event,
        }
    }

    /// Removes a registration, returns false if it was already gone
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.active.remove(&subscription.id).is_some()
    }

    pub fn is_subscribed(&self, event: HostEvent) -> bool {
        self.active.values().any(|e| *e == event)
    }

    pub fn listener_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let mut registry = EventRegistry::new();
        let resize = registry.subscribe(HostEvent::Resize);
        let unload = registry.subscribe(HostEvent::Unload);

        assert!(registry.is_subscribed(HostEvent::Resize));
        assert_eq!(registry.listener_count(), 2);

        assert!(registry.unsubscribe(resize));
        assert!(!registry.is_subscribed(HostEvent::Resize));
        assert!(registry.is_subscribed(HostEvent::Unload));

        assert!(registry.unsubscribe(unload));
        assert_eq!(registry.listener_count(), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut registry = EventRegistry::new();
        let first = registry.subscribe(HostEvent::Resize);
        let first_id = first.id;
        assert!(registry.unsubscribe(first));

        let second = registry.subscribe(HostEvent::Resize);
        assert_ne!(second.id, first_id);
        assert!(registry.unsubscribe(second));
    }
}
