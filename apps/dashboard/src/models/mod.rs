pub mod job;
pub mod persona;
