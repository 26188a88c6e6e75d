mod blueprints;
pub use blueprints::*;
mod points;
pub use points::*;
