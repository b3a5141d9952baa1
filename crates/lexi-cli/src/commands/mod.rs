pub mod common;
pub mod completions;
pub mod index;
pub mod log;
pub mod quote;
pub mod session;
pub mod word;
