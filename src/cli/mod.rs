pub mod command;
pub mod run;

pub use command::{Cli, Commands};
pub use run::run_app;
