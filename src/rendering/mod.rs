pub mod preview;

pub use preview::{encode_png, render_preview, render_preview_png};
