//! Lambda Invoker
//!
//! Calls the Lambda `Invoke` API (synchronous `RequestResponse`) over
//! blocking HTTP with SigV4 signing.

use chrono::Utc;

use super::sigv4::{self, Credentials, SigningRequest};
use super::types::InvokeError;
use super::InvocationTarget;
use crate::config::Config;
use crate::logic::http::build_agent;

// ============================================================================
// CONSTANTS
// ============================================================================

const SERVICE: &str = "lambda";
const INVOKE_API_VERSION: &str = "2015-03-31";

// ============================================================================
// INVOKER
// ============================================================================

pub struct LambdaInvoker {
    agent: ureq::Agent,
    credentials: Credentials,
    region: String,
    endpoint: String,
}

impl LambdaInvoker {
    pub fn new(region: &str, credentials: Credentials) -> Self {
        Self {
            agent: build_agent(),
            endpoint: format!("https://lambda.{}.amazonaws.com", region),
            region: region.to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.aws_region,
            Credentials {
                access_key_id: config.aws_access_key_id.clone(),
                secret_access_key: config.aws_secret_access_key.clone(),
            },
        )
    }

    /// Point the invoker at a different endpoint (local stacks, tests)
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    fn host(&self) -> &str {
        let without_scheme = self
            .endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(self.endpoint.as_str());
        without_scheme.split('/').next().unwrap_or(without_scheme)
    }
}

impl InvocationTarget for LambdaInvoker {
    fn invoke(&self, function: &str, payload: &[u8]) -> Result<u16, InvokeError> {
        let path = format!(
            "/{}/functions/{}/invocations",
            INVOKE_API_VERSION,
            urlencoding::encode(function)
        );

        let signed = sigv4::sign(
            &self.credentials,
            &SigningRequest {
                method: "POST",
                host: self.host(),
                path: &path,
                payload,
                region: &self.region,
                service: SERVICE,
            },
            Utc::now(),
        )?;

        let result = self
            .agent
            .post(&format!("{}{}", self.endpoint, path))
            .set("Content-Type", "application/json")
            .set("X-Amz-Date", &signed.amz_date)
            .set("Authorization", &signed.authorization)
            .send_bytes(payload);

        match result {
            Ok(resp) => {
                log::debug!("Lambda {} answered {}", function, resp.status());
                Ok(resp.status())
            }
            Err(ureq::Error::Status(code, _)) => Ok(code),
            Err(e) => Err(InvokeError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::testing::closed_url;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn invoker(endpoint: &str) -> LambdaInvoker {
        LambdaInvoker::new(
            "us-west-2",
            Credentials {
                access_key_id: "AKIDEXAMPLE".to_string(),
                secret_access_key: "secret".to_string(),
            },
        )
        .with_endpoint(endpoint)
    }

    #[test]
    fn test_default_endpoint() {
        let lambda = LambdaInvoker::new(
            "eu-central-1",
            Credentials {
                access_key_id: "a".to_string(),
                secret_access_key: "b".to_string(),
            },
        );
        assert_eq!(lambda.endpoint, "https://lambda.eu-central-1.amazonaws.com");
        assert_eq!(lambda.host(), "lambda.eu-central-1.amazonaws.com");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_invoke_posts_signed_payload() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/2015-03-31/functions/triage-bot/invocations"))
            .and(matchers::header_exists("x-amz-date"))
            .and(matchers::body_string(r#"{"identifier":"a1"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .expect(1)
            .mount(&server)
            .await;

        let status = invoker(&server.uri()).invoke("triage-bot", br#"{"identifier":"a1"}"#);
        assert_eq!(status.unwrap(), 200);

        let requests = server.received_requests().await.unwrap();
        let authorization = requests[0]
            .headers
            .get("authorization")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
        assert!(authorization.contains("/us-west-2/lambda/aws4_request"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_function_arn_is_encoded() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path(
                "/2015-03-31/functions/arn%3Aaws%3Alambda%3Aus-west-2%3A1%3Afunction%3Ax/invocations",
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let status = invoker(&server.uri()).invoke("arn:aws:lambda:us-west-2:1:function:x", b"{}");
        assert_eq!(status.unwrap(), 200);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(serde_json::json!({"message": "forbidden"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let status = invoker(&server.uri()).invoke("triage-bot", b"{}");
        assert_eq!(status.unwrap(), 403);
    }

    #[test]
    fn test_unreachable_endpoint() {
        let status = invoker(&closed_url()).invoke("triage-bot", b"{}");
        assert!(matches!(status, Err(InvokeError::Transport(_))));
    }
}
