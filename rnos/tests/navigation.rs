//! Integration tests for the navigation stub.

mod common;

use rnos::{Navigator, SharedLocation};

#[test]
fn test_to_string_reports_location() {
    let location = SharedLocation::new("https://app.local/inbox");
    let navigator = Navigator::new(location.clone());

    assert_eq!(navigator.to_string(), "https://app.local/inbox");
    // Reading has no side effects.
    assert_eq!(navigator.to_string(), "https://app.local/inbox");

    location.set("https://app.local/inbox/7");
    assert_eq!(format!("{navigator}"), "https://app.local/inbox/7");
}

#[test]
fn test_move_to_never_navigates() {
    let location = SharedLocation::new("/home");
    let navigator = Navigator::new(location);

    for segment in ["/settings", "", "..", "users/42?tab=1", "\u{1F600}"] {
        navigator.move_to(segment);
    }
    navigator.move_to(String::from("owned"));

    assert_eq!(navigator.current(), "/home");
}

#[cfg(feature = "tracing")]
#[test]
fn test_move_to_only_logs() {
    use common::LogCapture;
    use tracing_subscriber::util::SubscriberInitExt;

    let capture = LogCapture::default();
    let _guard = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .without_time()
        .finish()
        .set_default();

    let navigator = Navigator::new(|| "/home".to_string());
    navigator.move_to("reports");

    let output = capture.contents();
    assert!(output.contains("INFO"), "{output}");
    assert!(output.contains("Tried to move"), "{output}");
    assert!(output.contains("segment=reports"), "{output}");
    assert_eq!(navigator.to_string(), "/home");
}
