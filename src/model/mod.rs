pub mod dtos;
pub mod structs;

pub use dtos::{ApiOutcome, ApiReply};
pub use structs::{Activity, Roster};
