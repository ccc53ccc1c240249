use crate::api::{error, login, Error};

/// Where we send the user after a successful login.
pub const MAIN_PAGE_PATH: &str = "/mainpage";

/// What we tell the user when the server says no.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email or password is invalid";

/// The environment hosting the login form. This is the only way a login
/// attempt can have a visible effect.
pub trait Page {
    /// Leave the login form for another page.
    fn navigate(&mut self, path: &str);

    /// Show a message the user has to dismiss.
    fn alert(&mut self, message: &str);

    /// Record a failure without telling the user. By default this goes to
    /// the `tracing` error log.
    fn log_error(&mut self, error: &Error) {
        tracing::error!(?error, "login request failed");
    }
}

/// The single visible outcome of a login attempt.
#[derive(Debug)]
pub enum Reaction {
    /// The credentials worked; go to this path.
    Navigate(&'static str),

    /// The server rejected the credentials; show this message.
    Alert(&'static str),

    /// We never got a usable answer. Log it and do nothing else.
    Log(Error),
}

impl Reaction {
    /// Decide what to do with the result of a login request.
    pub fn from_result(result: error::Result<login::Resp>) -> Self {
        match result {
            Ok(resp) if resp.success => Self::Navigate(MAIN_PAGE_PATH),
            Ok(_) => Self::Alert(INVALID_CREDENTIALS_MESSAGE),
            Err(err) => Self::Log(err),
        }
    }

    /// Carry out the reaction on a page.
    pub fn apply<P: Page + ?Sized>(self, page: &mut P) {
        match self {
            Self::Navigate(path) => page.navigate(path),
            Self::Alert(message) => page.alert(message),
            Self::Log(err) => page.log_error(&err),
        }
    }
}
