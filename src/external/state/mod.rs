/// Persistence of the last known brightness between invocations
pub mod file;
pub mod interface;
pub mod mock;

pub use interface::*;

#[cfg(test)]
mod test;
