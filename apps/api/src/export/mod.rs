// Export: resume + identity → PDF bytes and a suggested filename.

pub mod artifact;
pub mod handlers;
