//! Serializable types exchanged with callers of the services.

pub mod package;
pub mod reservation;
pub mod student;
