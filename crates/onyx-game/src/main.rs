mod game;

use std::process::ExitCode;

use onyx_engine::device::GraphicsConfig;
use onyx_engine::error::GraphicsError;
use onyx_engine::logging::{init_logging, LoggingConfig};
use onyx_engine::window::{Runtime, RuntimeConfig};

use game::ClearColorGame;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Onyx Game".to_string(),
        ..RuntimeConfig::default()
    };

    match Runtime::run(config, GraphicsConfig::default(), ClearColorGame::new()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Prints the failure in full; the runtime has already logged its headline.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<GraphicsError>() {
        Some(gfx) => {
            if gfx.is_device_removed() {
                log::error!("graphics device removed; cannot continue");
            }
            eprintln!("{gfx}");
        }
        None => eprintln!("{err:?}"),
    }
}
