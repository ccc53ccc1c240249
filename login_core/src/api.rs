/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// Client for the login API
pub mod client;
pub use client::Client;

/// The login endpoint
pub mod login;
