//! Graphics error taxonomy.
//!
//! Native result codes are translated to text through static tables and wrapped
//! in [`GraphicsError`], which records where the failure was raised and any
//! diagnostics the debug layer produced.

mod code;
mod graphics;

pub use code::ErrorCode;
pub use graphics::{join_info, GraphicsError, Origin};
