use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ErrorCode, GraphicsError};

/// Messages reported by the GPU validation layer.
///
/// Handles are cheap clones sharing one queue; wgpu invokes its error handler
/// from whichever thread observed the error. Messages stay queued until the
/// frame loop drains them with [`take`](Self::take), so nothing reported
/// between frames is lost.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticQueue {
    messages: Arc<Mutex<Vec<String>>>,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: impl Into<String>) {
        self.lock().push(message.into());
    }

    /// Drains every message not yet reported.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Record of a lost device.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeviceLoss {
    pub reason: ErrorCode,
    pub message: String,
}

impl DeviceLoss {
    pub fn from_wgpu(reason: wgpu::DeviceLostReason, message: String) -> Self {
        // `Unknown` is a driver-side loss; anything else was initiated by us.
        let reason = if matches!(reason, wgpu::DeviceLostReason::Unknown) {
            ErrorCode::DeviceRemoved
        } else {
            ErrorCode::DeviceReset
        };
        Self { reason, message }
    }
}

/// Set once by the device-lost callback, read by the frame loop.
#[derive(Debug, Clone, Default)]
pub(crate) struct DeviceLossSlot {
    inner: Arc<Mutex<Option<DeviceLoss>>>,
}

impl DeviceLossSlot {
    pub(crate) fn set(&self, loss: DeviceLoss) {
        let mut slot = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        // Keep the first report; later ones are fallout.
        if slot.is_none() {
            *slot = Some(loss);
        }
    }

    pub(crate) fn get(&self) -> Option<DeviceLoss> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn is_lost(&self) -> bool {
        self.get().is_some()
    }
}

/// Decides what a finished frame reports.
///
/// Device loss wins over debug-layer output; the drained messages ride along as
/// its info. Without loss, messages become an `Info` error in debug mode only.
#[track_caller]
pub(crate) fn frame_outcome(
    loss: Option<DeviceLoss>,
    debug: bool,
    diagnostics: Vec<String>,
) -> Result<(), GraphicsError> {
    if let Some(loss) = loss {
        return Err(GraphicsError::device_removed(loss.reason, loss.message, diagnostics));
    }
    if debug && !diagnostics.is_empty() {
        return Err(GraphicsError::info(diagnostics));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_survive_until_drained() {
        let q = DiagnosticQueue::new();
        // Reported while a frame was skipped; must still surface on the next one.
        q.push("first");
        q.clone().push("second");
        assert!(!q.is_empty());
        assert_eq!(q.take(), vec!["first".to_string(), "second".to_string()]);
        assert!(q.take().is_empty());
    }

    #[test]
    fn take_drains() {
        let q = DiagnosticQueue::new();
        q.push("x");
        assert_eq!(q.take(), vec!["x".to_string()]);
        assert!(q.is_empty());
    }

    #[test]
    fn queue_is_shared_across_threads() {
        let q = DiagnosticQueue::new();
        let handle = {
            let q = q.clone();
            std::thread::spawn(move || q.push("from worker"))
        };
        handle.join().unwrap();
        assert_eq!(q.take(), vec!["from worker".to_string()]);
    }

    #[test]
    fn unknown_loss_is_device_removed() {
        let loss = DeviceLoss::from_wgpu(wgpu::DeviceLostReason::Unknown, "gone".into());
        assert_eq!(loss.reason, ErrorCode::DeviceRemoved);
        assert_eq!(loss.message, "gone");
    }

    #[test]
    fn destroyed_loss_is_device_reset() {
        let loss = DeviceLoss::from_wgpu(wgpu::DeviceLostReason::Destroyed, String::new());
        assert_eq!(loss.reason, ErrorCode::DeviceReset);
    }

    #[test]
    fn slot_keeps_first_loss() {
        let slot = DeviceLossSlot::default();
        assert!(!slot.is_lost());
        slot.set(DeviceLoss { reason: ErrorCode::DeviceHung, message: "a".into() });
        slot.set(DeviceLoss { reason: ErrorCode::DeviceReset, message: "b".into() });
        assert_eq!(slot.get().map(|l| l.reason), Some(ErrorCode::DeviceHung));
    }

    #[test]
    fn loss_is_reported_before_diagnostics() {
        let loss = DeviceLoss { reason: ErrorCode::DeviceHung, message: "tdr".into() };
        let err = frame_outcome(Some(loss), true, vec!["validation".into()]).unwrap_err();
        assert!(err.is_device_removed());
        assert_eq!(err.code(), Some(ErrorCode::DeviceHung));
        assert_eq!(err.info_text(), "validation");
    }

    #[test]
    fn diagnostics_become_info_in_debug() {
        let err = frame_outcome(None, true, vec!["a".into(), "b".into()]).unwrap_err();
        assert_eq!(err.kind_name(), "Onyx Graphics Info Error");
        assert_eq!(err.info_text(), "a\nb");
        assert!(err.origin().file.ends_with("diagnostics.rs"));
    }

    #[test]
    fn clean_frame_reports_nothing() {
        assert!(frame_outcome(None, true, Vec::new()).is_ok());
        assert!(frame_outcome(None, false, vec!["ignored".into()]).is_ok());
    }

    #[test]
    fn loss_is_reported_without_debug() {
        let loss = DeviceLoss { reason: ErrorCode::DeviceRemoved, message: String::new() };
        let err = frame_outcome(Some(loss), false, Vec::new()).unwrap_err();
        assert!(err.is_device_removed());
    }
}
