pub mod fuel;
pub mod payload;
pub mod plant;

pub use fuel::*;
pub use payload::*;
pub use plant::*;
