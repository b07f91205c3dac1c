#![allow(dead_code)]

use rnos::{CallError, Map, ServiceHub, Value};
use std::{
    io,
    sync::{Arc, Mutex},
};
use tracing_subscriber::fmt::MakeWriter;

// ============================================================================
// Test Services
// ============================================================================

/// `{ add(a, b), sub(a, b) }`
pub fn math() -> Value {
    Value::object([
        ("add", Value::function(|a: f64, b: f64| a + b)),
        ("sub", Value::function(|a: f64, b: f64| a - b)),
    ])
}

/// A nested service whose leaves are guarded by falsy values.
pub fn settings() -> Value {
    Value::object([
        (
            "display",
            Value::object([
                ("brightness", Value::from(0)),
                ("theme", Value::from("")),
                ("describe", Value::function(|| "display settings")),
            ]),
        ),
        ("retries", Value::from(3)),
        ("enabled", Value::from(false)),
    ])
}

/// A function that always fails with `message`.
pub fn failing(message: &'static str) -> Value {
    Value::Callable(rnos::Callable::new(move |_| Err(CallError::thrown(message))))
}

/// A hub with `math` and `settings` registered.
pub fn hub() -> ServiceHub {
    let mut hub = ServiceHub::new();
    hub.register("math", math());
    hub.register("settings", settings());
    hub
}

pub fn args<const N: usize>(values: [i32; N]) -> Vec<Value> {
    values.into_iter().map(Value::from).collect()
}

pub fn empty_object() -> Value {
    Value::from(Map::new())
}

// ============================================================================
// Log Capture
// ============================================================================

/// An in-memory writer for `tracing_subscriber::fmt`.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
