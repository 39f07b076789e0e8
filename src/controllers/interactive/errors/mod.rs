pub mod render_error;
pub mod scheduler_error;
