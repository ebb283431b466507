//! Use case implementations.

mod run_command_use_case;

pub use run_command_use_case::RunCommandUseCase;
