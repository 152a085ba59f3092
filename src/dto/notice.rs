use serde::Serialize;

/// Severity of a non-modal notification.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Warning,
    Success,
    Info,
}

impl NoticeLevel {
    /// CSS alert class used by the console templates.
    pub fn as_alert_class(self) -> &'static str {
        match self {
            NoticeLevel::Error => "danger",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
        }
    }
}

/// Toast-equivalent message surfaced by a controller.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
