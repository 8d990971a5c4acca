pub mod canvas;
pub mod paint;
pub mod record;
pub mod surface;

pub use canvas::Canvas;
pub use paint::VelloSurface;
pub use record::{DrawOp, FixedAdvance, RecordingSurface};
pub use surface::{Surface, TextRun};

// Colors appear in every drawing call
pub use pc_core::Color;
