use super::Action;
use crate::config::Config;
use login_core::{Client, Credentials, LoginSubmitter};

/// Connections to external services that effects use. We keep these around to
/// share a connection pool across every login attempt.
pub struct EffectContext {
    /// Sends credentials to the configured server
    submitter: LoginSubmitter,
}

impl EffectContext {
    /// Get a new `EffectContext`
    pub fn new(config: &Config) -> Self {
        Self {
            submitter: LoginSubmitter::with_http(
                Client::new(config.server.clone()),
                reqwest::Client::new(),
            ),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Send these credentials to the server
    LogIn(Credentials),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext) -> Option<Action> {
        match self {
            Self::LogIn(credentials) => {
                // Failures come back as part of the action. What to show for
                // them is up to the app, not us.
                let result = conn.submitter.submit(&credentials).await;

                Some(Action::LoginResponded(result))
            }
        }
    }
}
