pub mod gauge;
pub mod input;

pub use gauge::{confidence_gauge, nitrogen_gauge, phosphorus_gauge, potassium_gauge};
pub use input::{InputWidget, SelectWidget};
