//! Testing utilities for rnos.
//!
//! This module provides functions to register in place of real services so
//! tests can check what an invocation delivered.
//!
//! - [`RecordingCallable`]: records the arguments of every call
//! - [`CountingCallable`]: counts calls

use rnos_core::{Callable, Value};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Callable
// ============================================================================

/// A function that records the arguments of every call.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingCallable::returning(Value::from("ok"));
/// hub.register("svc", Value::object([("run", recorder.callable())]));
///
/// hub.invoke("svc.run", &[1.into()])?;
/// assert_eq!(recorder.calls(), vec![vec![Value::from(1)]]);
/// ```
#[derive(Clone)]
pub struct RecordingCallable {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
    result: Value,
}

impl RecordingCallable {
    /// Create a recorder that returns `undefined`.
    pub fn new() -> Self {
        Self::returning(Value::Undefined)
    }

    /// Create a recorder that returns `result` from every call.
    pub fn returning(result: impl Into<Value>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result: result.into(),
        }
    }

    /// A callable feeding this recorder.
    pub fn callable(&self) -> Value {
        let calls = Arc::clone(&self.calls);
        let result = self.result.clone();
        Value::Callable(
            Callable::new(move |args| {
                calls.lock().unwrap().push(args.to_vec());
                Ok(result.clone())
            })
            .with_name("recording"),
        )
    }

    /// Get a clone of the recorded argument lists.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Default for RecordingCallable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Counting Callable
// ============================================================================

/// A function that counts invocations and returns the running count.
#[derive(Clone, Default)]
pub struct CountingCallable {
    count: Arc<AtomicUsize>,
}

impl CountingCallable {
    /// Create a new counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// A callable feeding this counter.
    pub fn callable(&self) -> Value {
        let count = Arc::clone(&self.count);
        Value::Callable(
            Callable::new(move |_args| {
                let n = count.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(Value::from(n))
            })
            .with_name("counting"),
        )
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}
