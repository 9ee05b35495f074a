pub mod header;
pub mod login;
pub mod members;
