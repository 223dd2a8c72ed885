//! Onyx engine crate.
//!
//! Owns the window, the GPU device and swap chain, the frame loop and the
//! error reporting around them.

pub mod core;
pub mod device;
pub mod error;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;
