//! Dispatch layer: maps named calls with string arguments onto lifecycle operations.

pub mod dispatch;
pub mod invocation;
pub mod operation;

pub use dispatch::{Dispatcher, Response};
pub use invocation::{Invocation, Reply};
pub use operation::{CallClass, Operation};
