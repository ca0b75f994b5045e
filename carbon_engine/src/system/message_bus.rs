/// Process message bus.
///
/// Cooperative, single-consumer-per-mailbox delivery of system messages
/// (device lost/restored, garbage collection ticks, reload requests).
/// Messages may be delayed; a listener drains its due messages with
/// `collect`, in deadline order and then send order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex};
use slotmap::{new_key_type, SlotMap};
use crate::system::clock::Clock;

new_key_type! {
    /// Mailbox identifier returned by `MessageBus::subscribe`
    pub struct ListenerId;
}

/// System message kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    /// Render device was invalidated
    DeviceLost,
    /// Render device was re-established
    DeviceRestored,
    /// Periodic garbage sweep request
    CollectGarbage,
    /// Reload surface shaders and hardware shader permutations
    ReloadShaders,
    /// Reload scripts
    ReloadScripts,
    /// Broadcast once shaders have been reloaded
    ShadersReloaded,
    /// Broadcast once scripts have been reloaded
    ScriptsReloaded,
}

/// A delivered message with its sender
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub message: Message,
    pub sender: Option<ListenerId>,
}

struct Scheduled {
    deliver_at: f64,
    sequence: u64,
    envelope: Envelope,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deliver_at
            .total_cmp(&other.deliver_at)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Default)]
struct Mailbox {
    queue: BinaryHeap<Reverse<Scheduled>>,
}

#[derive(Default)]
struct BusState {
    mailboxes: SlotMap<ListenerId, Mailbox>,
    next_sequence: u64,
}

impl BusState {
    fn push(&mut self, target: ListenerId, envelope: Envelope, deliver_at: f64) -> bool {
        let sequence = self.next_sequence;
        match self.mailboxes.get_mut(target) {
            Some(mailbox) => {
                mailbox.queue.push(Reverse(Scheduled { deliver_at, sequence, envelope }));
                self.next_sequence += 1;
                true
            }
            None => false,
        }
    }
}

/// Shared message bus handle
///
/// Cloning yields another handle to the same bus.
#[derive(Clone)]
pub struct MessageBus {
    state: Arc<Mutex<BusState>>,
    clock: Arc<dyn Clock>,
}

impl MessageBus {
    /// Create a bus timed by `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(BusState::default())),
            clock,
        }
    }

    /// Clock used for delayed delivery
    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Register a new mailbox
    pub fn subscribe(&self) -> ListenerId {
        match self.state.lock() {
            Ok(mut state) => state.mailboxes.insert(Mailbox::default()),
            Err(poisoned) => poisoned.into_inner().mailboxes.insert(Mailbox::default()),
        }
    }

    /// Remove a mailbox and drop anything still queued for it
    pub fn unsubscribe(&self, listener: ListenerId) {
        if let Ok(mut state) = self.state.lock() {
            state.mailboxes.remove(listener);
        }
    }

    /// Is this mailbox still registered?
    pub fn is_subscribed(&self, listener: ListenerId) -> bool {
        self.state
            .lock()
            .map(|state| state.mailboxes.contains_key(listener))
            .unwrap_or(false)
    }

    /// Queue a message for one listener, delivered once `delay` seconds pass
    ///
    /// Returns false if the target is not subscribed.
    pub fn send_to(
        &self,
        sender: Option<ListenerId>,
        target: ListenerId,
        message: Message,
        delay: f64,
    ) -> bool {
        let deliver_at = self.clock.now() + delay.max(0.0);
        match self.state.lock() {
            Ok(mut state) => state.push(target, Envelope { message, sender }, deliver_at),
            Err(_) => false,
        }
    }

    /// Queue a message for every listener except the sender
    ///
    /// Returns the number of mailboxes reached.
    pub fn broadcast(&self, sender: Option<ListenerId>, message: Message) -> usize {
        let deliver_at = self.clock.now();
        let Ok(mut state) = self.state.lock() else {
            return 0;
        };
        let targets: Vec<ListenerId> = state
            .mailboxes
            .keys()
            .filter(|id| Some(*id) != sender)
            .collect();
        targets
            .into_iter()
            .filter(|target| state.push(*target, Envelope { message, sender }, deliver_at))
            .count()
    }

    /// Take every message whose delivery time has been reached
    pub fn collect(&self, listener: ListenerId) -> Vec<Envelope> {
        let now = self.clock.now();
        let mut due = Vec::new();
        if let Ok(mut state) = self.state.lock() {
            if let Some(mailbox) = state.mailboxes.get_mut(listener) {
                while mailbox
                    .queue
                    .peek()
                    .is_some_and(|Reverse(next)| next.deliver_at <= now)
                {
                    if let Some(Reverse(next)) = mailbox.queue.pop() {
                        due.push(next.envelope);
                    }
                }
            }
        }
        due
    }

    /// Number of queued (not yet collected) messages for a listener
    pub fn pending_count(&self, listener: ListenerId) -> usize {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.mailboxes.get(listener).map(|m| m.queue.len()))
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "message_bus_tests.rs"]
mod tests;
