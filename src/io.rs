pub mod client;
pub mod dtos;
pub mod preferences;
