//! User-facing notices
//!
//! A notice is a short titled message the session raises as work
//! completes or fails. Delivery is pluggable through [`Notifier`].

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something completed
    Info,
    /// Something failed
    Failure,
}

/// A titled message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short headline
    pub title: String,
    /// One-sentence body
    pub body: String,
    /// Severity
    pub kind: NoticeKind,
}

impl Notice {
    /// An informational notice
    #[must_use]
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: NoticeKind::Info,
        }
    }

    /// A failure notice
    #[must_use]
    pub fn failure(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: NoticeKind::Failure,
        }
    }
}

/// Sink for notices raised during a session
pub trait Notifier: Send + Sync {
    /// Deliver one notice
    fn notify(&self, notice: Notice);
}

/// Notifier that routes notices to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => {
                tracing::info!(title = %notice.title, "{}", notice.body);
            }
            NoticeKind::Failure => {
                tracing::warn!(title = %notice.title, "{}", notice.body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_the_kind() {
        let info = Notice::info("Image Generated!", "Your masterpiece is ready.");
        assert_eq!(info.kind, NoticeKind::Info);

        let failure = Notice::failure("Error", "empty prompt");
        assert_eq!(failure.kind, NoticeKind::Failure);
        assert_eq!(failure.title, "Error");
    }
}
