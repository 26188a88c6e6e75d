mod blueprints;
pub use blueprints::*;
