//! Text overlays drawn next to the canvas: frame stats and graph info.

mod info;
mod stats;

pub use info::{CALCULATING, InfoKey, InfoText};
pub use stats::FrameStats;
