//! Shared blocking HTTP helpers

use std::time::Duration;

use serde_json::Value;

use crate::constants::HTTP_TIMEOUT_SECONDS;

/// Agent used by every outbound client
pub fn build_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
        .build()
}

/// Read a JSON body from a call result.
///
/// Error-status responses still carry a body worth reading; only transport
/// failures and non-JSON bodies yield `None`.
pub fn read_json_body(result: Result<ureq::Response, ureq::Error>) -> Option<Value> {
    let response = match result {
        Ok(resp) => resp,
        Err(ureq::Error::Status(code, resp)) => {
            log::debug!("HTTP {} from {}", code, resp.get_url());
            resp
        }
        Err(e) => {
            log::warn!("Request failed: {}", e);
            return None;
        }
    };

    match response.into_json::<Value>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Response is not JSON: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    #[tokio::test(flavor = "multi_thread")]
    async fn test_error_status_body_is_read() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/denied"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(serde_json::json!({"error": "denied"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = build_agent().get(&format!("{}/denied", server.uri())).call();
        let body = read_json_body(result).unwrap();
        assert_eq!(body["error"], "denied");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_json_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = build_agent().get(&server.uri()).call();
        assert!(read_json_body(result).is_none());
    }
}
