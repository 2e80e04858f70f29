//! Persisted contact store and the state controller that keeps an observable
//! snapshot in step with it.

pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod errors;
pub mod prelude;
pub mod storage;
pub mod store;
