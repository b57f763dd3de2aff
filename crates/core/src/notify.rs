use std::io::{self, Write};

use chrono::Utc;

pub const NOTIFICATION_TITLE: &str = "Task";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn for_task(task: &str) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            title: NOTIFICATION_TITLE.to_string(),
            body: task.to_string(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: &Notification) -> io::Result<()>;
}

/// Posts desktop notifications through the OSC 9 escape understood by most terminal emulators.
pub struct TerminalNotifier<W: Write> {
    out: W,
}

impl TerminalNotifier<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for TerminalNotifier<W> {
    fn notify(&mut self, notification: &Notification) -> io::Result<()> {
        write!(
            self.out,
            "\x1b]9;{}: {}\x07",
            sanitize(&notification.title),
            sanitize(&notification.body)
        )?;
        self.out.flush()
    }
}

// control characters would terminate or corrupt the escape sequence
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Post a notification for `task`. Failures are logged and reported as `false`, never raised.
pub fn post_task_notification(notifier: &mut dyn Notifier, task: &str) -> bool {
    let notification = Notification::for_task(task);
    match notifier.notify(&notification) {
        Ok(()) => {
            tracing::info!(id = notification.id, "posted task notification");
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to post task notification");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenNotifier;

    impl Notifier for BrokenNotifier {
        fn notify(&mut self, _notification: &Notification) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn terminal_notifier_writes_osc9_sequence() {
        let mut notifier = TerminalNotifier::new(Vec::new());
        assert!(post_task_notification(&mut notifier, "Call\u{7} the\nbank"));

        let written = String::from_utf8(notifier.into_inner()).unwrap();
        assert_eq!(written, "\x1b]9;Task: Call  the bank\x07");
    }

    #[test]
    fn failures_are_swallowed() {
        assert!(!post_task_notification(&mut BrokenNotifier, "anything"));
    }

    #[test]
    fn notification_carries_task_text() {
        let notification = Notification::for_task("Water plants");
        assert_eq!(notification.title, NOTIFICATION_TITLE);
        assert_eq!(notification.body, "Water plants");
        assert!(notification.id > 0);
    }
}
