//! Synthetic events and listener bookkeeping.
//!
//! Events are dispatched on a target node and, when bubbling, walk the
//! ancestor chain up to the root. Listeners are plain closures; they do not
//! get access to the document, so dispatch never conflicts with an ongoing
//! document borrow.

use crate::node::NodeId;
use hatch_core::alloc::HashMap;
use std::rc::Rc;

/// A synthetic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: String,
    pub target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
}

impl DomEvent {
    /// Create a non-bubbling, non-cancelable event.
    pub fn new(kind: impl Into<String>, target: NodeId) -> Self {
        Self {
            kind: kind.into(),
            target,
            bubbles: false,
            cancelable: false,
        }
    }

    /// Set whether the event bubbles to ancestors.
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Set whether listeners may cancel the event.
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }
}

/// View of an event handed to a listener during dispatch.
pub struct EventContext<'e> {
    event: &'e DomEvent,
    current_target: NodeId,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl<'e> EventContext<'e> {
    pub(crate) fn new(event: &'e DomEvent, current_target: NodeId) -> Self {
        Self {
            event,
            current_target,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn event(&self) -> &DomEvent {
        self.event
    }

    pub fn kind(&self) -> &str {
        &self.event.kind
    }

    pub fn target(&self) -> NodeId {
        self.event.target
    }

    /// Node whose listener is currently running.
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    /// Stop the event from reaching further ancestors. Remaining listeners on
    /// the current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Mark the event as canceled. Ignored for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.event.cancelable {
            self.default_prevented = true;
        }
    }

    pub(crate) fn set_current_target(&mut self, node: NodeId) {
        self.current_target = node;
    }

    pub(crate) fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Event listener callback.
pub type Listener = Rc<dyn Fn(&mut EventContext<'_>)>;

/// Handle returned by `add_event_listener`, used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Result of dispatching an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of listener invocations.
    pub delivered: usize,
    /// Whether a listener canceled a cancelable event.
    pub default_prevented: bool,
}

struct ListenerEntry {
    id: ListenerId,
    kind: String,
    callback: Listener,
}

/// Per-node listener lists.
#[derive(Default)]
pub(crate) struct ListenerTable {
    next_id: u64,
    entries: HashMap<NodeId, Vec<ListenerEntry>>,
}

impl ListenerTable {
    pub(crate) fn add(&mut self, node: NodeId, kind: &str, callback: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.entry(node).or_default().push(ListenerEntry {
            id,
            kind: kind.to_string(),
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(list) = self.entries.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|entry| entry.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.entries.remove(&node);
        }
        removed
    }

    pub(crate) fn clear_node(&mut self, node: NodeId) {
        self.entries.remove(&node);
    }

    /// Snapshot of the listeners for `kind` on `node`, in registration order.
    pub(crate) fn matching(&self, node: NodeId, kind: &str) -> Vec<Listener> {
        self.entries
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|entry| entry.kind == kind)
                    .map(|entry| entry.callback.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node: NodeId) -> usize {
        self.entries.get(&node).map_or(0, Vec::len)
    }
}
