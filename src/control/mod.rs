//! Deciding what the display's brightness should become

pub mod adjustment;
pub mod invocation;
pub mod resolver;
