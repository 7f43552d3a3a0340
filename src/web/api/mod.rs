pub mod crew;
pub mod error;
pub mod iss;
