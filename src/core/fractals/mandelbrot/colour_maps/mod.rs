pub mod hsb_rainbow;
