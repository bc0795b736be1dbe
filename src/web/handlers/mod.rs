pub mod recd;
pub mod spotify;
