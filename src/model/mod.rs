pub mod constants;
pub mod geometry;
pub mod network;
pub mod network_error;
pub mod probability;
pub mod sample;
pub mod segment;
