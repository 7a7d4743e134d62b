pub mod comparison;
pub mod projection;
