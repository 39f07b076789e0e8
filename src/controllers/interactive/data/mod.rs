pub mod drag_state;
pub mod frame_data;
pub mod render_request;
