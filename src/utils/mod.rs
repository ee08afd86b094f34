pub mod base64;
pub mod string;
pub mod url;
pub mod useragent;

// Re-export common utilities
pub use string::{format_traffic, split_csv};
