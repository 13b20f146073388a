pub mod contact;
pub mod project_type;

pub use contact::{validate_submission, ContactSubmission};
pub use project_type::ProjectType;
