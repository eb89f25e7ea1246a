mod executor;

pub use executor::{ExecutionError, Executor, Report};
