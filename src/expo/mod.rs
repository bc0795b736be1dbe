// Expo push service integration.
//
// types: wire types shared by the client and the notify pipeline.
// traits: the PushGateway seam — tests substitute a mock, production
//         uses ExpoPushClient.
// client: thin reqwest wrapper over the Expo push HTTP API.

pub mod client;
pub mod traits;
pub mod types;
