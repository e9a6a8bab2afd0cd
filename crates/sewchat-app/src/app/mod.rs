pub mod repl;
pub mod task;

pub use repl::run_repl_mode;
pub use task::run_task_mode;
