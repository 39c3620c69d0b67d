pub mod browser;
pub mod config;
pub mod grading;
pub mod output;
pub mod quiz;
pub mod results;
pub mod stderr_buffer;
pub mod tui;
