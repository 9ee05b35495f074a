pub mod member_client;

pub use member_client::{MemberClient, classify_failure};
