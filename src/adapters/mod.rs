//! Format conversion helpers shared by presentation adapters.

pub mod pixel_format;
