pub mod assets;
pub mod contract;
