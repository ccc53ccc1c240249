use super::error::Result;
use super::login;
use url::Url;

/// Client for the login API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `http://localhost:8080`.
    pub server: String,
}

impl Client {
    /// Construct a new client
    pub fn new(server: String) -> Self {
        Self { server }
    }

    /// Log into the server.
    ///
    /// The status code is logged but otherwise ignored: a 401 or 500 with a
    /// JSON body is read the same way as a 200.
    ///
    /// ## Errors
    ///
    /// - `Error::UrlParse` if `server` is not a valid base URL
    /// - `Error::Network` if the request fails or the body can't be read
    /// - `Error::Parse` / `Error::NullBody` if the body can't be interpreted
    pub async fn login(&self, client: &reqwest::Client, req: &login::Req) -> Result<login::Resp> {
        let url = self.url(login::PATH)?;

        let resp = client.post(url).json(req).send().await?;
        tracing::debug!(status = %resp.status(), "got login response");

        let body = resp.bytes().await?;

        login::Resp::from_slice(&body)
    }

    /// Resolve a page path (like the one we navigate to after logging in)
    /// against the server.
    ///
    /// ## Errors
    ///
    /// `Error::UrlParse` if `server` is not a valid base URL.
    pub fn page_url(&self, path: &str) -> Result<Url> {
        self.url(path)
    }

    /// Join a path onto the server URL.
    fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&self.server)?.join(path)?)
    }
}
