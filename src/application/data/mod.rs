mod output;

pub use output::{ColorChoice, LogLevel};
