pub mod provision;
pub mod show;
