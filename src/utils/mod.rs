pub mod constants;
pub mod encoding;
pub mod filter;
pub mod format;
pub mod logger;

pub use self::filter::{filter_data, FilterOptions};
pub use self::logger::Logger;
