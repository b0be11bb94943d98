/// Desktop notifications about the outcome of an invocation
pub mod interface;
pub mod mock;
pub mod notify_send;

pub use interface::*;
