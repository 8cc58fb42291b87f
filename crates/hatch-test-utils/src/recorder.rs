//! Thread-local call recording for probe components.

use hatch_dom::NodeId;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::sync::Arc;

/// A lifecycle call observed during a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// A constructor ran to completion.
    Constructed { component: &'static str, element: NodeId },
    /// A constructor returned an error.
    Failed { component: &'static str, element: NodeId },
    /// A teardown hook ran.
    Downgraded { component: &'static str, element: NodeId },
    /// An upgrade callback or observer ran.
    Callback { label: String, element: NodeId },
}

thread_local! {
    static CURRENT: RefCell<Option<CallRecorder>> = const { RefCell::new(None) };
}

/// Shared, cloneable list of recorded calls.
///
/// Clones share the same list, so a clone can be moved into a callback
/// closure while the test keeps reading the original.
#[derive(Debug, Clone, Default)]
pub struct CallRecorder {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder and make it the current one for this thread.
    pub fn install() -> Self {
        let recorder = Self::new();
        CURRENT.with(|current| *current.borrow_mut() = Some(recorder.clone()));
        recorder
    }

    pub fn push(&self, call: RecordedCall) {
        self.calls.lock().push(call);
    }

    /// Record a callback invocation under `label`.
    pub fn callback(&self, label: impl Into<String>, element: NodeId) {
        self.push(RecordedCall::Callback {
            label: label.into(),
            element,
        });
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Remove and return the calls recorded so far.
    pub fn take(&self) -> Vec<RecordedCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Number of successful constructions of `component`.
    pub fn count_constructed(&self, component: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RecordedCall::Constructed { component: c, .. } if *c == component))
            .count()
    }

    /// Number of teardown hooks run for `component`.
    pub fn count_downgraded(&self, component: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RecordedCall::Downgraded { component: c, .. } if *c == component))
            .count()
    }
}

/// Record `call` on the current thread's recorder. No-op when none is installed.
pub fn record(call: RecordedCall) {
    CURRENT.with(|current| {
        if let Some(recorder) = current.borrow().as_ref() {
            recorder.push(call);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_goes_to_installed_recorder() {
        let recorder = CallRecorder::install();
        record(RecordedCall::Constructed {
            component: "Foo",
            element: NodeId(1),
        });
        recorder.clone().callback("ready", NodeId(1));

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.count_constructed("Foo"), 1);
        assert_eq!(recorder.take().len(), 2);
        assert!(recorder.is_empty());
    }
}
