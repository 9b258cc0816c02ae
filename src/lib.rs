#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic of the TaskVault backend: the"]
#![doc = "credential and token subsystem, the ownership-scoped data stores, the domain"]
#![doc = "models, routing configuration, and error handling. It is used by the main"]
#![doc = "binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
