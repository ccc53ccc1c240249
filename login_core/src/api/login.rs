use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The request to log into the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// Email the account was registered with. Sent as typed.
    pub email: String,

    /// Plaintext password. Sent as typed.
    pub password: String,
}

impl Req {
    /// Construct a request from whatever the user typed. No trimming and no
    /// emptiness check; the server decides what's valid.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Result of logging in.
///
/// Servers answer with `{"success": bool, ...}`, but we don't insist on that
/// shape. `success` is whatever the `success` member of the body is *truthy*
/// as, and anything missing is falsy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resp {
    /// Did the credentials authenticate?
    pub success: bool,

    /// Human-readable explanation, if the server sent one.
    pub message: Option<String>,

    /// Display name of the account, if the server sent one.
    pub username: Option<String>,

    /// Email of the account, if the server sent one.
    pub email: Option<String>,
}

impl Resp {
    /// Parse a response body the way a browser decodes JSON: invalid UTF-8
    /// becomes U+FFFD and a leading byte order mark is dropped.
    ///
    /// ## Errors
    ///
    /// - `Error::Parse` if the body is not JSON
    /// - `Error::NullBody` if the body is JSON `null`
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(body);
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);

        let value: Value = serde_json::from_str(text)?;

        Self::from_value(&value)
    }

    /// Interpret an already-parsed response body. Bodies that aren't objects
    /// have no `success` member, so they come back as unsuccessful rather than
    /// as an error.
    ///
    /// ## Errors
    ///
    /// `Error::NullBody` if the value is `null`.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Err(Error::NullBody),
            Value::Object(fields) => Ok(Self {
                success: fields.get("success").is_some_and(is_truthy),
                message: string_field(fields, "message"),
                username: string_field(fields, "username"),
                email: string_field(fields, "email"),
            }),
            _ => Ok(Self::default()),
        }
    }
}

/// Get an optional string member, ignoring members of any other type.
fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// Truthiness as a browser would judge it: `false`, `null`, zero and the
/// empty string are falsy. Every other value, including empty arrays and
/// objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        // Numbers keep their source text, so `1e400` reads as infinity
        // (truthy) and `1e-400` as zero (falsy).
        Value::Number(n) => n
            .to_string()
            .parse::<f64>()
            .is_ok_and(|n| n.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Where the login endpoint lives.
pub const PATH: &str = "/login";

#[cfg(test)]
mod test {
    use super::*;
    use proptest::proptest;
    use serde_json::json;

    #[test]
    fn request_serializes_to_exactly_two_fields() {
        let req = Req::new(" someone@example.com ", "");

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"email": " someone@example.com ", "password": ""})
        );
    }

    #[test]
    fn success_true_is_success() {
        let resp = Resp::from_slice(br#"{"success": true}"#).unwrap();

        assert!(resp.success);
    }

    #[test]
    fn success_false_is_not_success() {
        let resp = Resp::from_slice(br#"{"success": false}"#).unwrap();

        assert!(!resp.success);
    }

    #[test]
    fn missing_success_is_not_success() {
        let resp = Resp::from_slice(br#"{"message": "hi"}"#).unwrap();

        assert_eq!(
            resp,
            Resp {
                success: false,
                message: Some("hi".to_string()),
                username: None,
                email: None,
            }
        );
    }

    #[test]
    fn reads_full_server_response() {
        let resp = Resp::from_slice(
            br#"{"success": true, "message": "Login successful", "username": "Jo", "email": "jo@example.com"}"#,
        )
        .unwrap();

        assert_eq!(
            resp,
            Resp {
                success: true,
                message: Some("Login successful".to_string()),
                username: Some("Jo".to_string()),
                email: Some("jo@example.com".to_string()),
            }
        );
    }

    #[test]
    fn ignores_extra_fields_of_the_wrong_type() {
        let resp = Resp::from_slice(br#"{"success": 1, "username": 42}"#).unwrap();

        assert!(resp.success);
        assert_eq!(resp.username, None);
    }

    #[test]
    fn non_object_bodies_are_not_success() {
        let bodies: [&[u8]; 4] = [b"true", b"1", b"\"success\"", b"[true]"];

        for body in bodies {
            assert_eq!(Resp::from_slice(body).unwrap(), Resp::default());
        }
    }

    #[test]
    fn null_body_is_an_error() {
        assert!(matches!(Resp::from_slice(b"null"), Err(Error::NullBody)));
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(matches!(
            Resp::from_slice(b"<html>502 Bad Gateway</html>"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn leading_byte_order_mark_is_dropped() {
        let resp = Resp::from_slice(b"\xEF\xBB\xBF{\"success\": true}").unwrap();

        assert!(resp.success);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let resp = Resp::from_slice(b"{\"success\": true, \"message\": \"\xff\"}").unwrap();

        assert!(resp.success);
        assert_eq!(resp.message.as_deref(), Some("\u{FFFD}"));
    }

    #[test]
    fn out_of_range_numbers_follow_their_float_value() {
        assert!(Resp::from_slice(br#"{"success": 1e400}"#).unwrap().success);
        assert!(Resp::from_slice(br#"{"success": -1e400}"#).unwrap().success);
        assert!(!Resp::from_slice(br#"{"success": 1e-400}"#).unwrap().success);
    }

    #[test]
    fn falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(-0.0), json!("")] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
    }

    #[test]
    fn empty_containers_are_truthy() {
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    proptest! {
        #[test]
        fn nonzero_integers_are_truthy(n in proptest::num::i64::ANY) {
            proptest::prop_assume!(n != 0);
            proptest::prop_assert!(is_truthy(&json!(n)));
        }

        #[test]
        fn nonempty_strings_are_truthy(s in ".+") {
            proptest::prop_assert!(is_truthy(&json!(s)));
        }

        #[test]
        fn other_fields_never_decide_success(message: String, username: String) {
            let resp = Resp::from_value(&json!({"message": message, "username": username})).unwrap();

            proptest::prop_assert!(!resp.success);
        }
    }
}
