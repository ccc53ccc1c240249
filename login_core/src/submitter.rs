use crate::api::{error::Result, login, Client};
use crate::reaction::{Page, Reaction};

/// Submits credentials to the login endpoint. Every call is independent:
/// there's no de-duplication, no in-flight guard, no retry, and no timeout.
#[derive(Debug, Clone)]
pub struct LoginSubmitter {
    /// Where to send credentials
    client: Client,

    /// Connection pool shared by every submission
    http: reqwest::Client,
}

impl LoginSubmitter {
    /// Get a submitter with its own connection pool.
    pub fn new(client: Client) -> Self {
        Self::with_http(client, reqwest::Client::new())
    }

    /// Get a submitter that shares an existing connection pool.
    pub fn with_http(client: Client, http: reqwest::Client) -> Self {
        Self { client, http }
    }

    /// Send credentials and wait for the server's verdict.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `Client::login`.
    #[tracing::instrument(skip_all, fields(server = %self.client.server))]
    pub async fn submit(&self, credentials: &login::Req) -> Result<login::Resp> {
        tracing::info!("submitting credentials");

        let resp = self.client.login(&self.http, credentials).await?;

        if resp.success {
            tracing::info!(username = ?resp.username, "login accepted");
        } else {
            tracing::info!(message = ?resp.message, "login rejected");
        }

        Ok(resp)
    }

    /// Send credentials and react on `page`: navigate on success, alert on
    /// rejection, and only log if we never got a usable answer.
    pub async fn submit_to<P: Page + ?Sized>(&self, credentials: &login::Req, page: &mut P) {
        Reaction::from_result(self.submit(credentials).await).apply(page);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::Error;
    use crate::test::{refused_server, stub_server, Failure, RecordingPage};
    use serde_json::json;

    fn submitter(server: String) -> LoginSubmitter {
        LoginSubmitter::new(Client::new(server))
    }

    #[test_log::test(tokio::test)]
    async fn sends_exactly_the_credentials_as_json() {
        let stub = stub_server(r#"{"success": true}"#).await;

        submitter(stub.url.clone())
            .submit(&login::Req::new("a@example.com", "hunter2"))
            .await
            .unwrap();

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/login");
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&requests[0].body).unwrap(),
            json!({"email": "a@example.com", "password": "hunter2"})
        );
    }

    #[test_log::test(tokio::test)]
    async fn sends_credentials_untrimmed() {
        let stub = stub_server(r#"{"success": false}"#).await;

        submitter(stub.url.clone())
            .submit(&login::Req::new("  spaced@example.com\t", ""))
            .await
            .unwrap();

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&stub.requests()[0].body).unwrap(),
            json!({"email": "  spaced@example.com\t", "password": ""})
        );
    }

    #[test_log::test(tokio::test)]
    async fn success_navigates() {
        let stub = stub_server(r#"{"success": true, "username": "Jo"}"#).await;
        let mut page = RecordingPage::default();

        submitter(stub.url.clone())
            .submit_to(&login::Req::new("a@example.com", "right"), &mut page)
            .await;

        assert_eq!(page.navigations, vec!["/mainpage".to_string()]);
        assert!(page.alerts.is_empty());
        assert!(page.errors.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn rejection_alerts() {
        let stub = stub_server(r#"{"success": false, "message": "Invalid email or password"}"#)
            .await;
        let mut page = RecordingPage::default();

        submitter(stub.url.clone())
            .submit_to(&login::Req::new("a@example.com", "wrong"), &mut page)
            .await;

        assert_eq!(page.alerts, vec!["Email or password is invalid".to_string()]);
        assert!(page.navigations.is_empty());
        assert!(page.errors.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn non_json_is_only_logged() {
        let stub = stub_server("Internal Server Error").await;
        let mut page = RecordingPage::default();

        submitter(stub.url.clone())
            .submit_to(&login::Req::new("a@example.com", "pw"), &mut page)
            .await;

        assert!(page.navigations.is_empty());
        assert!(page.alerts.is_empty());
        assert_eq!(page.errors, vec![Failure::Parse]);
    }

    #[test_log::test(tokio::test)]
    async fn refused_connection_is_only_logged() {
        let url = refused_server().await;
        let mut page = RecordingPage::default();

        submitter(url)
            .submit_to(&login::Req::new("a@example.com", "pw"), &mut page)
            .await;

        assert!(page.navigations.is_empty());
        assert!(page.alerts.is_empty());
        assert_eq!(page.errors, vec![Failure::Network]);
    }

    #[test_log::test(tokio::test)]
    async fn status_code_does_not_matter() {
        let stub = stub_server(r#"{"success": false}"#)
            .await
            .with_status(axum::http::StatusCode::UNAUTHORIZED);

        let resp = submitter(stub.url.clone())
            .submit(&login::Req::new("a@example.com", "pw"))
            .await
            .unwrap();

        assert!(!resp.success);
    }

    #[test_log::test(tokio::test)]
    async fn bad_server_url_is_an_error() {
        let result = submitter("nope".to_string())
            .submit(&login::Req::new("a@example.com", "pw"))
            .await;

        assert!(matches!(result, Err(Error::UrlParse(_))));
    }

    #[test_log::test(tokio::test)]
    async fn concurrent_submissions_are_independent() {
        let stub = stub_server(r#"{"success": true}"#).await;
        let submitter = submitter(stub.url.clone());

        let first = login::Req::new("first@example.com", "one");
        let second = login::Req::new("second@example.com", "two");

        let (a, b) = tokio::join!(submitter.submit(&first), submitter.submit(&second));
        assert!(a.unwrap().success);
        assert!(b.unwrap().success);

        let mut emails: Vec<String> = stub
            .requests()
            .iter()
            .map(|req| {
                serde_json::from_str::<serde_json::Value>(&req.body).unwrap()["email"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();
        emails.sort();

        assert_eq!(emails, vec!["first@example.com", "second@example.com"]);
    }
}
