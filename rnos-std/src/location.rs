//! Navigation stub.
//!
//! [`Navigator`] reports the current location as a string and accepts move
//! requests. Moving is a placeholder: it logs the request and leaves the
//! location untouched.

use std::{
    fmt,
    sync::{Arc, RwLock},
};

/// Where the current location is read from.
pub trait LocationSource {
    /// The current location.
    fn current(&self) -> String;
}

impl LocationSource for String {
    fn current(&self) -> String {
        self.clone()
    }
}

impl<F> LocationSource for F
where
    F: Fn() -> String,
{
    fn current(&self) -> String {
        self()
    }
}

/// A location owned elsewhere and updated from outside the navigator.
#[derive(Debug, Clone, Default)]
pub struct SharedLocation(Arc<RwLock<String>>);

impl SharedLocation {
    /// Create a shared location starting at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(location.into())))
    }

    /// Replace the location.
    pub fn set(&self, location: impl Into<String>) {
        let mut guard = self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = location.into();
    }
}

impl LocationSource for SharedLocation {
    fn current(&self) -> String {
        self.0
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Reads the current location and accepts (but does not perform) moves.
///
/// The location renders through [`Display`](fmt::Display), so
/// `navigator.to_string()` is the current location.
#[derive(Debug, Clone)]
pub struct Navigator<S> {
    source: S,
}

impl<S: LocationSource> Navigator<S> {
    /// Create a navigator over `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The current location.
    pub fn current(&self) -> String {
        self.source.current()
    }

    /// Request a move to `segment`.
    ///
    /// Never fails and never changes the location; the request is only
    /// logged.
    pub fn move_to(&self, segment: impl AsRef<str>) {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(segment = %segment.as_ref(), "Tried to move");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = segment;
        }
    }
}

impl<S: LocationSource> fmt::Display for Navigator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_reads_source() {
        let location = SharedLocation::new("https://app.local/home");
        let navigator = Navigator::new(location.clone());
        assert_eq!(navigator.to_string(), "https://app.local/home");

        location.set("https://app.local/settings");
        assert_eq!(navigator.to_string(), "https://app.local/settings");
        assert_eq!(navigator.current(), "https://app.local/settings");
    }

    #[test]
    fn test_closure_source() {
        let navigator = Navigator::new(|| "about:blank".to_string());
        assert_eq!(navigator.to_string(), "about:blank");
    }

    #[test]
    fn test_move_to_leaves_location() {
        let navigator = Navigator::new("/home".to_string());
        navigator.move_to("/elsewhere");
        navigator.move_to("");
        navigator.move_to("../../\u{0}");
        assert_eq!(navigator.to_string(), "/home");
    }

    #[cfg(feature = "tracing")]
    mod logging {
        use super::*;
        use std::{io, sync::Mutex};
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Capture {
            fn contents(&self) -> String {
                String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
            }
        }

        impl io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for Capture {
            type Writer = Capture;

            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        #[test]
        fn test_move_to_logs_request() {
            let capture = Capture::default();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(capture.clone())
                .with_ansi(false)
                .without_time()
                .finish();

            let navigator = Navigator::new("/home".to_string());
            tracing::subscriber::with_default(subscriber, || navigator.move_to("users/42"));

            let output = capture.contents();
            assert!(output.contains("Tried to move"), "{output}");
            assert!(output.contains("segment=users/42"), "{output}");
        }
    }
}
