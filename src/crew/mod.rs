mod cache;
mod error;

pub use cache::{CrewCache, CrewMember, CrewPayload};
pub use error::CrewError;
