pub mod model;
pub mod validation;
pub mod workflow;
