// HTTP routes
pub mod analyze;
pub mod entities;
pub mod health;
pub mod mask;

pub use analyze::*;
pub use entities::*;
pub use health::*;
pub use mask::*;
