//! Exit codes for eventsift plugins.
//!
//! Exit codes communicate outcome without requiring output parsing. The
//! 0-3 range matches the conventional monitoring check statuses, so a
//! plugin doubling as a check can report severity directly.

/// Exit codes for plugin processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Normal completion, including suppression of the event.
    Ok = 0,

    /// Check-status warning.
    Warning = 1,

    /// Check-status critical.
    Critical = 2,

    /// Check-status unknown.
    Unknown = 3,

    /// Configuration error
    ConfigError = 10,

    /// Event parse error
    ParseError = 11,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map a raw check status (as found in an event's `check.status`) to
    /// an exit code; anything outside 0-2 is reported as unknown.
    pub fn from_check_status(status: i64) -> Self {
        match status {
            0 => ExitCode::Ok,
            1 => ExitCode::Warning,
            2 => ExitCode::Critical,
            _ => ExitCode::Unknown,
        }
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Ok)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
