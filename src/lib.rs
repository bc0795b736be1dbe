// Recd backend: Spotify token exchange and push notification delivery.
//
// This is the library root. Each module corresponds to one external
// collaborator or one stage of the notification pipeline.

pub mod config;
pub mod expo;
pub mod notify;
pub mod spotify;
pub mod store;
pub mod web;
