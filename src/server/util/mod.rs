//! Utility helpers shared by services and the scheduler.

pub mod time;
