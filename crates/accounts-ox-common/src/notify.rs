use strum::{AsRefStr, Display};

/// Kind of user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum NotifyKind {
    Success,
    Error,
    Info,
    Warning,
}

/// Fire-and-forget notification sink (toasts in the browser console).
///
/// Implementations must not block; the gateway and page controllers call it inline and do
/// not wait for the notification to be displayed.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NotifyKind);

    fn success(&self, message: &str) {
        self.notify(message, NotifyKind::Success);
    }

    fn error(&self, message: &str) {
        self.notify(message, NotifyKind::Error);
    }
}

/// Writes notifications through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, kind: NotifyKind) {
        let level = match kind {
            NotifyKind::Error => log::Level::Error,
            NotifyKind::Warning => log::Level::Warn,
            NotifyKind::Success | NotifyKind::Info => log::Level::Info,
        };
        log::log!(target: "accounts::notify", level, "[{kind}] {message}");
    }
}
