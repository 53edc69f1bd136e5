//! Builds the request for one submission, sends it, and routes the reply.

use std::future::Future;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::conditions::ConditionSet;
use crate::normalize::Normalizer;
use crate::render::Renderer;
use crate::SubmissionError;

/// Shown when the service fails without saying why.
pub const GENERIC_SERVICE_ERROR: &str =
  "An error occurred while solving the equation.";

/// JSON body sent to the solving service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionPayload {
  pub equation: String,
  pub initial_conditions: Vec<String>,
}

/// Status and body of whatever the service answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReply {
  pub status: u16,
  pub body: String,
}

impl ServiceReply {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// No reply could be obtained at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportFailure(pub String);

/// Carries a payload to the solving service.
pub trait SolverTransport {
  fn post_json(
    &self,
    payload: &SolutionPayload,
  ) -> impl Future<Output = Result<ServiceReply, TransportFailure>>;
}

#[derive(Debug, Default, Deserialize)]
struct ReplyBody {
  solution: Option<String>,
  error: Option<String>,
}

/// A successful submission.
#[derive(Debug, Clone)]
pub struct Solution {
  pub request_id: Uuid,
  pub payload: SolutionPayload,
  /// Service text before rendering.
  pub raw: String,
  pub markup: String,
}

/// Per-user state that outlives a single submission.
#[derive(Debug, Clone, Default)]
pub struct Session {
  pub conditions: ConditionSet,
  in_flight: bool,
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_conditions(conditions: ConditionSet) -> Self {
    Session {
      conditions,
      in_flight: false,
    }
  }

  pub fn is_submitting(&self) -> bool {
    self.in_flight
  }

  /// Mark a request as in flight. Returns `false` if one already was, in
  /// which case the caller must not dispatch another.
  pub fn begin_submission(&mut self) -> bool {
    !std::mem::replace(&mut self.in_flight, true)
  }

  pub fn finish_submission(&mut self) {
    self.in_flight = false;
  }
}

pub struct Orchestrator<T> {
  transport: T,
  normalizer: Normalizer,
  renderer: Renderer,
}

impl<T: SolverTransport> Orchestrator<T> {
  pub fn new(transport: T) -> Self {
    Self::with_pipeline(transport, Normalizer::default(), Renderer::default())
  }

  pub fn with_pipeline(
    transport: T,
    normalizer: Normalizer,
    renderer: Renderer,
  ) -> Self {
    Orchestrator {
      transport,
      normalizer,
      renderer,
    }
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// Normalize the equation and collect the conditions. Never touches the
  /// network.
  pub fn prepare(
    &self,
    raw_equation: &str,
    conditions: &ConditionSet,
  ) -> Result<SolutionPayload, SubmissionError> {
    let trimmed = raw_equation.trim();
    if trimmed.is_empty() {
      return Err(SubmissionError::EmptyInput);
    }

    let equation = self.normalizer.normalize(trimmed);
    debug!("normalized {trimmed:?} to {equation:?}");

    Ok(SolutionPayload {
      equation,
      initial_conditions: conditions.values(),
    })
  }

  /// Send one prepared payload and wait for its reply.
  pub async fn dispatch(
    &self,
    payload: SolutionPayload,
  ) -> Result<Solution, SubmissionError> {
    let request_id = Uuid::new_v4();
    info!(
      "[{request_id}] solving {:?} with {} initial condition(s)",
      payload.equation,
      payload.initial_conditions.len()
    );

    let reply = self.transport.post_json(&payload).await.map_err(|e| {
      error!("[{request_id}] transport failure: {e}");
      SubmissionError::TransportError { detail: e.0 }
    })?;

    let body: ReplyBody = serde_json::from_str(&reply.body).map_err(|e| {
      error!(
        "[{request_id}] unreadable reply (status {}): {e}",
        reply.status
      );
      SubmissionError::TransportError {
        detail: format!("malformed reply body: {e}"),
      }
    })?;

    if !reply.is_success() {
      let message = body
        .error
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
      warn!("[{request_id}] service answered {}: {message}", reply.status);
      return Err(SubmissionError::ServiceError(message));
    }

    let raw = body.solution.unwrap_or_default();
    debug!("[{request_id}] received {} bytes of solution", raw.len());
    let markup = self.renderer.render(&raw);

    Ok(Solution {
      request_id,
      payload,
      raw,
      markup,
    })
  }

  /// Run one submission for `session`: prepare, dispatch, render.
  ///
  /// Empty input is rejected before any request is made. The mutable borrow
  /// keeps a session from having two submissions in flight.
  pub async fn submit(
    &self,
    session: &mut Session,
    raw_equation: &str,
  ) -> Result<Solution, SubmissionError> {
    let payload = self.prepare(raw_equation, &session.conditions)?;

    let _in_flight = InFlight::begin(session);
    self.dispatch(payload).await
  }
}

/// Holds a session's in-flight flag for the life of one `submit` call and
/// clears it on drop, including when the future is dropped mid-await. A flag
/// the caller set beforehand is left for the caller to clear.
struct InFlight<'a> {
  session: &'a mut Session,
  owned: bool,
}

impl<'a> InFlight<'a> {
  fn begin(session: &'a mut Session) -> Self {
    let owned = session.begin_submission();
    InFlight { session, owned }
  }
}

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    if self.owned {
      self.session.finish_submission();
    }
  }
}
