pub mod message;
pub mod tvseries;
