pub mod greedy;
pub mod normalize;
pub mod settings;
pub mod strategies;
pub mod summary;
pub mod types;

pub use greedy::*;
pub use normalize::*;
pub use settings::*;
pub use strategies::*;
pub use summary::*;
pub use types::*;
