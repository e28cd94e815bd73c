pub mod crop;
pub mod diagnosis;
pub mod field;
pub mod inputs;
pub mod practice;
pub mod recommendation;

pub use crop::*;
pub use diagnosis::*;
pub use field::*;
pub use inputs::*;
pub use practice::*;
pub use recommendation::*;
