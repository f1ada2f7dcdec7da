use std::fmt;
use std::str::FromStr;

use crate::errors::NtfyError;

/// Notification priority, sent as its decimal value in `X-Priority`.
///
/// `Unknown` means no priority header is sent and the relay applies its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    #[default]
    Unknown = 0,
    Min = 1,
    Low = 2,
    Normal = 3,
    High = 4,
    Max = 5,
}

impl Level {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this level produces an `X-Priority` header.
    pub fn is_set(self) -> bool {
        self > Level::Unknown
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl TryFrom<u8> for Level {
    type Error = NtfyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Level::Unknown),
            1 => Ok(Level::Min),
            2 => Ok(Level::Low),
            3 => Ok(Level::Normal),
            4 => Ok(Level::High),
            5 => Ok(Level::Max),
            other => Err(NtfyError::InvalidArgument(format!(
                "priority out of range: {other}"
            ))),
        }
    }
}

/// Accepts the decimal value or the relay's priority names
/// (`min`, `low`, `default`, `high`, `max`/`urgent`).
impl FromStr for Level {
    type Err = NtfyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u8>() {
            return Level::try_from(value);
        }
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(Level::Min),
            "low" => Ok(Level::Low),
            "default" | "normal" => Ok(Level::Normal),
            "high" => Ok(Level::High),
            "max" | "urgent" => Ok(Level::Max),
            _ => Err(NtfyError::InvalidArgument(format!("unknown priority: {s}"))),
        }
    }
}

/// A single notification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    /// Sent verbatim as the request body. Must not be empty.
    pub body: String,
    pub priority: Level,
    pub tags: Vec<String>,
    /// Attachment reference, usually a URL.
    pub attach: String,
}

impl Message {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_priority(mut self, priority: Level) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attach(mut self, attach: impl Into<String>) -> Self {
        self.attach = attach.into();
        self
    }
}
