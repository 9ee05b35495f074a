pub mod member;
pub mod session;

// Re-export commonly used types
pub use member::{Member, MemberDraft, MemberField};
pub use session::{Credentials, SessionStatus};
