//! Foundation utilities shared by the conversion pipeline

pub mod logging;
pub mod math;
