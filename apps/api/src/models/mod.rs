pub mod guidance;
pub mod job;
pub mod profile;
