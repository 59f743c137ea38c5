pub mod audit;
pub mod password;

pub use audit::{FailureLog, Operation, Outcome, TracingLog};
