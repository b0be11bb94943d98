/// Control of external display brightness
pub mod ddcutil;
pub mod interface;
pub mod mock;

pub use interface::*;
