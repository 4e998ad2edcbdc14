// Layout: turns a resume into positioned draw operations on fixed-size pages.
// Pure and CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod canvas;
pub mod dates;
pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod labels;

// Re-export the public API consumed by the export pipeline and handlers.
pub use engine::{layout_resume, LayoutReport, LayoutSettings, PaginationMode};
pub use geometry::default_page_geometry;
pub use labels::{Labels, Locale};
