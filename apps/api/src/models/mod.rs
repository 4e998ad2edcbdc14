pub mod resume;
pub mod user;

pub use resume::{Experience, Formation, ResumeRecord};
pub use user::IdentityRecord;
