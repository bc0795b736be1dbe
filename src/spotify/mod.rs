// Spotify accounts API integration (client-credentials token exchange).

pub mod client;
