pub mod members;
pub mod utils;

pub use members::{print_field_errors, print_member, print_member_summary, print_members};
pub use utils::{admin_badge, or_dash, truncate};
