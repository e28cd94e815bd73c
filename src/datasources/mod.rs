pub mod plant_health;

pub use plant_health::PlantHealthClient;
