//! Generic lifecycle observers.
//!
//! Per-type upgrade callbacks live on the descriptor. Observers registered
//! here see every upgrade or downgrade regardless of component type.

use hatch_dom::NodeId;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    Upgraded,
    Downgraded,
}

/// Notification passed to lifecycle observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub kind: LifecycleKind,
    pub element: NodeId,
    /// Name of the component that was applied or removed.
    pub component: String,
}

pub type LifecycleObserver = Rc<dyn Fn(&LifecycleEvent)>;

#[derive(Default)]
pub(crate) struct ObserverList {
    upgraded: Vec<LifecycleObserver>,
    downgraded: Vec<LifecycleObserver>,
}

impl ObserverList {
    pub(crate) fn push(&mut self, kind: LifecycleKind, observer: LifecycleObserver) {
        match kind {
            LifecycleKind::Upgraded => self.upgraded.push(observer),
            LifecycleKind::Downgraded => self.downgraded.push(observer),
        }
    }

    /// Snapshot of the observers for `kind`, in registration order.
    pub(crate) fn snapshot(&self, kind: LifecycleKind) -> Vec<LifecycleObserver> {
        match kind {
            LifecycleKind::Upgraded => self.upgraded.clone(),
            LifecycleKind::Downgraded => self.downgraded.clone(),
        }
    }
}
