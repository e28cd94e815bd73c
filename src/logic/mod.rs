pub mod advisory;
pub mod area;
pub mod calculator;
pub mod nutrients;

pub use calculator::{compute, compute_raw};
