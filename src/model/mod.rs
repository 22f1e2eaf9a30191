pub mod intervention;
pub mod plan;
pub mod resource;

pub use intervention::{Intervention, InterventionStatus};
pub use plan::Plan;
pub use resource::{Resource, ResourceKind};
