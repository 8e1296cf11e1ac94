pub mod entities;
pub mod risks;

pub use entities::find_entities;
pub use risks::detect_risks;
