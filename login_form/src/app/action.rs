use crossterm::event::KeyEvent;
use login_core::api::{error, login};

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; display it to the user
    Problem(String),

    /// A login request finished, one way or another
    LoginResponded(error::Result<login::Resp>),
}
