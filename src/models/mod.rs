pub mod identity;
pub mod task;

pub use identity::{CredentialsRequest, Identity};
pub use task::{StatusInput, Task, TaskInput, TaskQuery, TaskStatus};
