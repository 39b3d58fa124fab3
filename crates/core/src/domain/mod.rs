pub mod market;
pub mod symbol;
