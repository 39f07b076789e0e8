pub mod calculate_slice_count;
pub mod hsb_to_rgb;
