pub mod reward;
pub mod swap;
