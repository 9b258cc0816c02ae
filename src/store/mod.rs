pub mod identities;
pub mod tasks;

pub use identities::IdentityStore;
pub use tasks::TaskStore;
