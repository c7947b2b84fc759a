//! CLI command handlers. Each command is in its own file for clarity.

mod completions;
mod man;
mod run;
mod validate;

pub use completions::run_completions;
pub use man::run_man;
pub use run::run_pipeline;
pub use validate::run_validate;
