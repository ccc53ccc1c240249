//! Common code for submitting credentials to a login endpoint and reacting to
//! the answer. Hosts (the TUI, tests) provide a `Page` to react on.

/// Talk to the login server.
pub mod api;
pub use api::login::Req as Credentials;
pub use api::Client;

/// What a host should do with the result of a login attempt.
pub mod reaction;
pub use reaction::{Page, Reaction};

/// Submit credentials and react to the response in one call.
pub mod submitter;
pub use submitter::LoginSubmitter;
