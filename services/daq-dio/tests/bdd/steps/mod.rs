pub mod attribute_steps;
pub mod lifecycle_steps;
pub mod switch_steps;
