use onyx_engine::core::{App, AppControl, FrameCtx};
use onyx_engine::device::FramePresent;
use onyx_engine::input::{InputState, Key};

/// Clears the window to a color pulsing between white and blue and shows the
/// running time in the title bar.
#[derive(Debug, Default)]
pub struct ClearColorGame {
    elapsed: f32,
}

impl ClearColorGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}

/// Title bar text for the given running time.
pub fn title_for(elapsed: f32) -> String {
    format!("Time elapsed: {elapsed:.1}s")
}

/// Red/green channel of the clear color; blue stays at full.
///
/// Follows a sine wave in `[0, 1]`, so the color swings from white to blue.
pub fn pulse(elapsed: f32) -> f32 {
    elapsed.sin() / 2.0 + 0.5
}

impl App for ClearColorGame {
    fn handle_input(&mut self, _dt: f32, input: &InputState) -> AppControl {
        if input.frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl> {
        self.advance(ctx.time.dt);

        ctx.window.set_title(&title_for(self.elapsed));

        let c = pulse(self.elapsed);
        ctx.graphics.clear_buffer(c, c, 1.0)?;

        if ctx.graphics.end_frame()? == FramePresent::Skipped {
            log::trace!("frame {} skipped", ctx.time.frame_index);
        }

        Ok(AppControl::Continue)
    }
}
