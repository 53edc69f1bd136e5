use std::time::Duration;

use reqwest::{Client, Url};

use crate::orchestrator::{
  ServiceReply, SolutionPayload, SolverTransport, TransportFailure,
};
use crate::SetupError;

/// Address of the solving endpoint when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/solve_ode";

/// Posts payloads as JSON to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: Client,
  endpoint: Url,
}

impl HttpTransport {
  /// `timeout` bounds the whole request. `None` waits indefinitely.
  pub fn new(
    endpoint: &str,
    timeout: Option<Duration>,
  ) -> Result<Self, SetupError> {
    let invalid = |reason: String| SetupError::InvalidEndpoint {
      endpoint: endpoint.to_string(),
      reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
      return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(|e| invalid(e.to_string()))?;

    Ok(HttpTransport {
      client,
      endpoint: url,
    })
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }
}

impl SolverTransport for HttpTransport {
  async fn post_json(
    &self,
    payload: &SolutionPayload,
  ) -> Result<ServiceReply, TransportFailure> {
    let response = self
      .client
      .post(self.endpoint.clone())
      .json(payload)
      .send()
      .await
      .map_err(|e| TransportFailure(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
      .text()
      .await
      .map_err(|e| TransportFailure(e.to_string()))?;

    Ok(ServiceReply { status, body })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_endpoint_is_valid() {
    let transport = HttpTransport::new(DEFAULT_ENDPOINT, None).unwrap();
    assert_eq!(transport.endpoint().path(), "/solve_ode");
  }

  #[test]
  fn rejects_non_http_endpoints() {
    assert!(matches!(
      HttpTransport::new("ftp://example.com/solve", None),
      Err(SetupError::InvalidEndpoint { .. })
    ));
    assert!(HttpTransport::new("not a url", None).is_err());
  }
}
