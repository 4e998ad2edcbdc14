// Render: encodes a laid-out document as PDF bytes.

pub mod pdf;

pub use pdf::{render_pdf, RenderError};
