pub mod algorithm;
pub mod colour_maps;
pub mod errors;
pub mod iteration_budget;
pub mod mandelbrot_config;
