pub mod fixture;
pub mod scatter;
