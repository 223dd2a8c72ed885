use std::fmt;
use std::panic::Location;

use super::ErrorCode;

/// Source location where an error was raised.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
}

impl Origin {
    /// Captures the location of the caller.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for Origin {
    fn from(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[File] {}\n[Line] {}", self.file, self.line)
    }
}

/// Failure raised by the graphics layer.
///
/// Every variant records where it was raised. `info` holds diagnostic messages
/// reported by the debug layer while the failing call ran (empty in release).
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsError {
    /// A native call returned a failure code.
    Hr {
        code: ErrorCode,
        info: Vec<String>,
        origin: Origin,
    },

    /// The device became unusable and must be recreated.
    ///
    /// `code` is the removal reason reported by the driver.
    DeviceRemoved {
        code: ErrorCode,
        reason: String,
        info: Vec<String>,
        origin: Origin,
    },

    /// The call succeeded but the debug layer reported problems.
    Info { info: Vec<String>, origin: Origin },

    /// Device or surface creation failed before any result code existed.
    Init { message: String, origin: Origin },
}

impl GraphicsError {
    #[track_caller]
    pub fn hr(code: ErrorCode) -> Self {
        Self::hr_with_info(code, Vec::new())
    }

    /// Wraps a failed call. Device-loss codes become [`GraphicsError::DeviceRemoved`].
    #[track_caller]
    pub fn hr_with_info(code: ErrorCode, info: Vec<String>) -> Self {
        if code.is_device_loss() {
            return GraphicsError::DeviceRemoved {
                code,
                reason: String::new(),
                info,
                origin: Origin::caller(),
            };
        }
        GraphicsError::Hr {
            code,
            info,
            origin: Origin::caller(),
        }
    }

    #[track_caller]
    pub fn device_removed(code: ErrorCode, reason: impl Into<String>, info: Vec<String>) -> Self {
        GraphicsError::DeviceRemoved {
            code,
            reason: reason.into(),
            info,
            origin: Origin::caller(),
        }
    }

    #[track_caller]
    pub fn info(info: Vec<String>) -> Self {
        GraphicsError::Info {
            info,
            origin: Origin::caller(),
        }
    }

    #[track_caller]
    pub fn init(message: impl Into<String>) -> Self {
        GraphicsError::Init {
            message: message.into(),
            origin: Origin::caller(),
        }
    }

    /// Headline used as the first line of the report.
    pub fn kind_name(&self) -> &'static str {
        match self {
            GraphicsError::Hr { .. } => "Onyx Graphics Error",
            GraphicsError::DeviceRemoved { .. } => "Onyx Graphics Error [Device Removed]",
            GraphicsError::Info { .. } => "Onyx Graphics Info Error",
            GraphicsError::Init { .. } => "Onyx Graphics Init Error",
        }
    }

    pub fn is_device_removed(&self) -> bool {
        matches!(self, GraphicsError::DeviceRemoved { .. })
    }

    /// Result code, if the failure carries one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            GraphicsError::Hr { code, .. } | GraphicsError::DeviceRemoved { code, .. } => {
                Some(*code)
            }
            GraphicsError::Info { .. } | GraphicsError::Init { .. } => None,
        }
    }

    pub fn origin(&self) -> Origin {
        match self {
            GraphicsError::Hr { origin, .. }
            | GraphicsError::DeviceRemoved { origin, .. }
            | GraphicsError::Info { origin, .. }
            | GraphicsError::Init { origin, .. } => *origin,
        }
    }

    /// Debug-layer messages joined by newlines.
    pub fn info_text(&self) -> String {
        match self {
            GraphicsError::Hr { info, .. }
            | GraphicsError::DeviceRemoved { info, .. }
            | GraphicsError::Info { info, .. } => join_info(info),
            GraphicsError::Init { .. } => String::new(),
        }
    }
}

/// Joins messages with `\n`, without a trailing newline.
pub fn join_info(messages: &[String]) -> String {
    messages.join("\n")
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind_name())?;

        match self {
            GraphicsError::Hr { code, .. } | GraphicsError::DeviceRemoved { code, .. } => {
                writeln!(f, "[Error Code] {code}")?;
                writeln!(f, "[Error String] {}", code.error_string())?;
                writeln!(f, "[Description] {}", code.description())?;
            }
            GraphicsError::Init { message, .. } => {
                writeln!(f, "[Message] {message}")?;
            }
            GraphicsError::Info { .. } => {}
        }

        if let GraphicsError::DeviceRemoved { reason, .. } = self {
            if !reason.is_empty() {
                writeln!(f, "[Reason] {reason}")?;
            }
        }

        let info = self.info_text();
        if !info.is_empty() {
            write!(f, "\n[Error Info]\n{info}\n\n")?;
        }

        write!(f, "{}", self.origin())
    }
}

impl std::error::Error for GraphicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: u32) -> Origin {
        Origin { file: "src/device/gpu.rs", line }
    }

    #[test]
    fn origin_captures_caller() {
        let expected = line!() + 1;
        let err = GraphicsError::hr(ErrorCode::Fail);
        assert_eq!(err.origin().line, expected);
        assert!(err.origin().file.ends_with("graphics.rs"));
    }

    #[test]
    fn hr_report_layout() {
        let err = GraphicsError::Hr {
            code: ErrorCode::InvalidCall,
            info: Vec::new(),
            origin: at(42),
        };
        assert_eq!(
            err.to_string(),
            "Onyx Graphics Error\n\
             [Error Code] 0x887A0001 (2289696769)\n\
             [Error String] Invalid call\n\
             [Description] The method call is invalid in the current state. Verify the correct API usage sequence.\n\
             [File] src/device/gpu.rs\n\
             [Line] 42"
        );
    }

    #[test]
    fn info_block_present_only_with_messages() {
        let err = GraphicsError::Hr {
            code: ErrorCode::Fail,
            info: vec!["first".into(), "second".into()],
            origin: at(7),
        };
        let text = err.to_string();
        assert!(text.contains("\n[Error Info]\nfirst\nsecond\n\n[File]"));

        let quiet = GraphicsError::Hr {
            code: ErrorCode::Fail,
            info: Vec::new(),
            origin: at(7),
        };
        assert!(!quiet.to_string().contains("[Error Info]"));
    }

    #[test]
    fn info_error_has_no_code_lines() {
        let err = GraphicsError::Info {
            info: vec!["validation failed".into()],
            origin: at(3),
        };
        let text = err.to_string();
        assert!(text.starts_with("Onyx Graphics Info Error\n\n[Error Info]\nvalidation failed"));
        assert!(!text.contains("[Error Code]"));
        assert_eq!(err.code(), None);
    }

    #[test]
    fn device_removed_is_classified() {
        let err = GraphicsError::device_removed(ErrorCode::DeviceHung, "driver timeout", Vec::new());
        assert!(err.is_device_removed());
        assert_eq!(err.code(), Some(ErrorCode::DeviceHung));
        assert!(err.to_string().starts_with("Onyx Graphics Error [Device Removed]\n"));
        assert!(err.to_string().contains("[Reason] driver timeout\n"));
    }

    #[test]
    fn failed_call_with_loss_code_is_device_removed() {
        for code in [ErrorCode::DeviceRemoved, ErrorCode::DeviceHung, ErrorCode::DeviceReset] {
            let err = GraphicsError::hr_with_info(code, vec!["lost".into()]);
            assert!(err.is_device_removed(), "{code}");
            assert_eq!(err.code(), Some(code));
            assert_eq!(err.kind_name(), "Onyx Graphics Error [Device Removed]");
            assert!(!err.to_string().contains("[Reason]"));
            assert_eq!(err.info_text(), "lost");
        }

        assert!(!GraphicsError::hr(ErrorCode::DriverInternalError).is_device_removed());
        assert!(!GraphicsError::hr(ErrorCode::OutOfMemory).is_device_removed());
    }

    #[test]
    fn join_info_has_no_trailing_newline() {
        assert_eq!(join_info(&["a".into(), "b".into()]), "a\nb");
        assert_eq!(join_info(&[]), "");
    }

    #[test]
    fn flows_through_anyhow() {
        let err: anyhow::Error = GraphicsError::init("no adapter").into();
        let back = err.downcast_ref::<GraphicsError>().map(GraphicsError::kind_name);
        assert_eq!(back, Some("Onyx Graphics Init Error"));
    }
}
