use winit::event::WindowEvent;

use crate::input::InputState;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the game.
pub trait App {
    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame before `on_frame`, with the frame delta in seconds.
    fn handle_input(&mut self, dt: f32, input: &InputState) -> AppControl {
        let _ = (dt, input);
        AppControl::Continue
    }

    /// Called once per frame. An error stops the loop and is returned from
    /// `Runtime::run`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl>;
}
