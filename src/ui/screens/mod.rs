pub mod calculator;
pub mod crops;
pub mod diagnosis;

pub use calculator::{CalculatorField, CalculatorScreen};
pub use crops::CropsScreen;
pub use diagnosis::DiagnosisScreen;
