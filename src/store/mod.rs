// User document store.
//
// The only read this service performs is the push-token lookup for a
// notification target. The trait keeps handlers testable; production
// uses the Firestore REST backend.

pub mod firestore;
pub mod traits;

pub use traits::UserStore;
