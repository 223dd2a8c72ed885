use std::borrow::Cow;
use std::fmt;

/// Facility number of result codes raised by the windowing layer.
const FACILITY_WINDOWS: u32 = 8;

/// Native result code reported by the graphics layer.
///
/// Raw values follow HRESULT numbering so codes stay stable across backends and
/// can be matched against driver logs. Codes outside the known table are carried
/// as `Other`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorCode {
    Ok,
    Fail,
    InvalidArg,
    OutOfMemory,
    NotImpl,

    DeviceRemoved,
    DeviceHung,
    DeviceReset,
    DriverInternalError,
    InvalidCall,
    Unsupported,
    MoreData,
    NonExclusive,
    NotCurrentlyAvailable,
    WasStillDrawing,

    FileNotFound,
    TooManyUniqueStateObjects,
    TooManyUniqueViewObjects,
    DeferredContextMapWithoutInitialDiscard,

    /// Code not present in the lookup tables.
    Other(u32),
}

/// Known codes paired with their raw value.
const KNOWN: [(ErrorCode, u32); 19] = [
    (ErrorCode::Ok, 0x0000_0000),
    (ErrorCode::Fail, 0x8000_4005),
    (ErrorCode::InvalidArg, 0x8007_0057),
    (ErrorCode::OutOfMemory, 0x8007_000E),
    (ErrorCode::NotImpl, 0x8000_4001),
    (ErrorCode::DeviceRemoved, 0x887A_0005),
    (ErrorCode::DeviceHung, 0x887A_0006),
    (ErrorCode::DeviceReset, 0x887A_0007),
    (ErrorCode::DriverInternalError, 0x887A_0020),
    (ErrorCode::InvalidCall, 0x887A_0001),
    (ErrorCode::Unsupported, 0x887A_0004),
    (ErrorCode::MoreData, 0x887A_0003),
    (ErrorCode::NonExclusive, 0x887A_0021),
    (ErrorCode::NotCurrentlyAvailable, 0x887A_0022),
    (ErrorCode::WasStillDrawing, 0x887A_000A),
    (ErrorCode::FileNotFound, 0x887C_0002),
    (ErrorCode::TooManyUniqueStateObjects, 0x887C_0001),
    (ErrorCode::TooManyUniqueViewObjects, 0x887C_0003),
    (ErrorCode::DeferredContextMapWithoutInitialDiscard, 0x887C_0004),
];

impl ErrorCode {
    /// Resolves a raw code. Unknown values become `Other`.
    pub fn from_raw(raw: u32) -> Self {
        KNOWN
            .iter()
            .find(|(_, r)| *r == raw)
            .map(|(code, _)| *code)
            .unwrap_or(ErrorCode::Other(raw))
    }

    /// Returns the raw 32-bit value.
    pub fn raw(self) -> u32 {
        match self {
            ErrorCode::Other(raw) => raw,
            known => KNOWN
                .iter()
                .find(|(code, _)| *code == known)
                .map(|(_, raw)| *raw)
                .unwrap_or_default(),
        }
    }

    /// `true` for codes that mean the device is gone and must be recreated.
    pub fn is_device_loss(self) -> bool {
        matches!(
            self,
            ErrorCode::DeviceRemoved | ErrorCode::DeviceHung | ErrorCode::DeviceReset
        )
    }

    /// `true` for the success code (and any raw value without the severity bit).
    pub fn is_success(self) -> bool {
        self.raw() & 0x8000_0000 == 0
    }

    /// Facility field of the raw code.
    pub fn facility(self) -> u32 {
        (self.raw() >> 16) & 0x1FFF
    }

    /// Short human-readable name.
    pub fn error_string(self) -> Cow<'static, str> {
        let s = match self {
            ErrorCode::Ok => "Operation successful",
            ErrorCode::Fail => "Unspecified error",
            ErrorCode::InvalidArg => "Invalid argument",
            ErrorCode::OutOfMemory => "Out of memory",
            ErrorCode::NotImpl => "Not implemented",

            ErrorCode::DeviceRemoved => "Device removed",
            ErrorCode::DeviceHung => "Device hung",
            ErrorCode::DeviceReset => "Device reset",
            ErrorCode::DriverInternalError => "Driver internal error",
            ErrorCode::InvalidCall => "Invalid call",
            ErrorCode::Unsupported => "Unsupported operation",
            ErrorCode::MoreData => "More data required",
            ErrorCode::NonExclusive => "Resource non-exclusive",
            ErrorCode::NotCurrentlyAvailable => "Resource not currently available",
            ErrorCode::WasStillDrawing => "Previous operation still in progress",

            ErrorCode::FileNotFound => "File not found",
            ErrorCode::TooManyUniqueStateObjects => "Too many unique state objects",
            ErrorCode::TooManyUniqueViewObjects => "Too many unique view objects",
            ErrorCode::DeferredContextMapWithoutInitialDiscard => {
                "Invalid deferred context map operation"
            }

            ErrorCode::Other(raw) => {
                return if self.facility() == FACILITY_WINDOWS {
                    Cow::Owned(format!("Windows error {}", raw & 0xFFFF))
                } else {
                    Cow::Owned(format!("Unknown error code (0x{raw:08X})"))
                };
            }
        };
        Cow::Borrowed(s)
    }

    /// Long description with a hint at the usual remedy.
    pub fn description(self) -> Cow<'static, str> {
        let s = match self {
            ErrorCode::Ok => "The operation completed successfully.",

            ErrorCode::Fail => {
                "An unspecified error occurred. Check the debug output for more information."
            }
            ErrorCode::InvalidArg => {
                "An invalid argument was passed to the function. Verify all parameters are within valid ranges."
            }
            ErrorCode::OutOfMemory => {
                "Insufficient memory to complete the operation. Try reducing resource usage or closing other applications."
            }
            ErrorCode::NotImpl => {
                "The requested feature is not implemented in the current version."
            }

            ErrorCode::DeviceRemoved => {
                "The GPU was physically removed, stopped responding, or driver was updated. \
                 Application should release and recreate the device."
            }
            ErrorCode::DeviceHung => {
                "The GPU stopped responding to commands. This may be due to a driver issue or \
                 intensive operations. Application should reset the device."
            }
            ErrorCode::DeviceReset => {
                "The GPU was reset by another application or driver update. \
                 Application should recreate the device and reload all resources."
            }
            ErrorCode::DriverInternalError => {
                "GPU driver encountered an internal error. Try updating your graphics drivers."
            }
            ErrorCode::InvalidCall => {
                "The method call is invalid in the current state. Verify the correct API usage sequence."
            }
            ErrorCode::Unsupported => {
                "The requested feature is not supported by the hardware or driver."
            }
            ErrorCode::MoreData => {
                "The buffer supplied was too small to receive the requested data."
            }
            ErrorCode::NonExclusive => {
                "The resource is in use by another client and cannot be acquired exclusively."
            }
            ErrorCode::NotCurrentlyAvailable => {
                "The resource or request is not currently available. Try again later."
            }
            ErrorCode::WasStillDrawing => {
                "The GPU was busy with a previous operation. Retry the call on a later frame."
            }

            ErrorCode::FileNotFound => {
                "The specified shader or resource file could not be found. Verify file paths and permissions."
            }
            ErrorCode::TooManyUniqueStateObjects => {
                "Too many unique state objects created. Consider reusing existing state objects."
            }
            ErrorCode::TooManyUniqueViewObjects => {
                "Too many unique view objects created. Consider reusing existing view objects."
            }
            ErrorCode::DeferredContextMapWithoutInitialDiscard => {
                "A deferred context mapped a resource without discarding it first."
            }

            ErrorCode::Other(raw) => {
                return Cow::Owned(format!(
                    "Unhandled error code (0x{raw:08X}). \
                     Please refer to the graphics API documentation or check debug output for more details."
                ));
            }
        };
        Cow::Borrowed(s)
    }

    /// Maps a surface acquisition failure onto the closest native code.
    pub fn from_surface_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Timeout => ErrorCode::WasStillDrawing,
            wgpu::SurfaceError::Outdated => ErrorCode::InvalidCall,
            wgpu::SurfaceError::Lost => ErrorCode::DeviceReset,
            wgpu::SurfaceError::OutOfMemory => ErrorCode::OutOfMemory,
            wgpu::SurfaceError::Other => ErrorCode::Fail,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.raw();
        write!(f, "0x{raw:08X} ({raw})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── raw values ────────────────────────────────────────────────────────

    #[test]
    fn known_codes_resolve_from_raw() {
        for (code, raw) in KNOWN {
            assert_eq!(ErrorCode::from_raw(raw), code);
            assert_eq!(code.raw(), raw);
        }
    }

    #[test]
    fn unknown_raw_is_carried_as_other() {
        assert_eq!(ErrorCode::from_raw(0x1234_5678), ErrorCode::Other(0x1234_5678));
        assert_eq!(ErrorCode::Other(0x1234_5678).raw(), 0x1234_5678);
    }

    #[test]
    fn device_removed_uses_dxgi_numbering() {
        assert_eq!(ErrorCode::DeviceRemoved.raw(), 0x887A_0005);
        assert_eq!(ErrorCode::DeviceRemoved.facility(), 0x87A);
    }

    #[test]
    fn success_is_only_without_severity_bit() {
        assert!(ErrorCode::Ok.is_success());
        assert!(!ErrorCode::Fail.is_success());
        assert!(!ErrorCode::DeviceHung.is_success());
    }

    // ── strings ───────────────────────────────────────────────────────────

    #[test]
    fn error_string_is_pure() {
        for (code, _) in KNOWN {
            assert_eq!(code.error_string(), code.error_string());
            assert_eq!(code.description(), code.description());
        }
        let other = ErrorCode::Other(0xDEAD_BEEF);
        assert_eq!(other.error_string(), other.error_string());
        assert_eq!(other.description(), other.description());
    }

    #[test]
    fn known_strings_come_from_table() {
        assert_eq!(ErrorCode::DeviceRemoved.error_string(), "Device removed");
        assert!(matches!(ErrorCode::InvalidArg.error_string(), Cow::Borrowed(_)));
        assert!(ErrorCode::DeviceHung.description().starts_with("The GPU stopped responding"));
    }

    #[test]
    fn unknown_code_formats_hex() {
        let code = ErrorCode::Other(0xDEAD_BEEF);
        assert_eq!(code.error_string(), "Unknown error code (0xDEADBEEF)");
        assert!(code.description().starts_with("Unhandled error code (0xDEADBEEF)."));
    }

    #[test]
    fn unknown_windows_facility_reports_low_word() {
        let code = ErrorCode::from_raw(0x8008_0005);
        assert_eq!(code.facility(), 8);
        assert_eq!(code.error_string(), "Windows error 5");
    }

    #[test]
    fn unknown_facility_7_code_is_not_special_cased() {
        let code = ErrorCode::from_raw(0x8007_0005);
        assert_eq!(code.error_string(), "Unknown error code (0x80070005)");
        // Facility 7 codes in the table still resolve by name.
        assert_eq!(ErrorCode::from_raw(0x8007_0057).error_string(), "Invalid argument");
    }

    #[test]
    fn loss_codes_are_flagged() {
        assert!(ErrorCode::DeviceRemoved.is_device_loss());
        assert!(ErrorCode::DeviceHung.is_device_loss());
        assert!(ErrorCode::DeviceReset.is_device_loss());
        assert!(!ErrorCode::DriverInternalError.is_device_loss());
        assert!(!ErrorCode::Fail.is_device_loss());
    }

    #[test]
    fn display_shows_hex_and_decimal() {
        assert_eq!(ErrorCode::Fail.to_string(), "0x80004005 (2147500037)");
    }

    #[test]
    fn surface_errors_map_to_codes() {
        assert_eq!(
            ErrorCode::from_surface_error(&wgpu::SurfaceError::OutOfMemory),
            ErrorCode::OutOfMemory
        );
        assert_eq!(
            ErrorCode::from_surface_error(&wgpu::SurfaceError::Lost),
            ErrorCode::DeviceReset
        );
    }
}
