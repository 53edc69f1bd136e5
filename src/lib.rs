use thiserror::Error;

pub mod catalog;
pub mod conditions;
pub mod logging;
pub mod normalize;
pub mod orchestrator;
pub mod render;
pub mod surface;
pub mod transport;

pub use conditions::{ConditionSet, Controls};
pub use normalize::{normalize, Normalizer, Notation};
pub use orchestrator::{
  Orchestrator, Session, Solution, SolutionPayload, SolverTransport,
};
pub use render::{render, HtmlPolicy, Renderer};
pub use transport::{HttpTransport, DEFAULT_ENDPOINT};

/// Why a submission produced no solution. Every variant is recovered at the
/// orchestration boundary; see [`surface::present`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
  #[error("Please enter an equation.")]
  EmptyInput,
  #[error("{0}")]
  ServiceError(String),
  #[error("Could not connect to the server.")]
  TransportError { detail: String },
}

/// Invalid configuration, caught before anything is submitted.
#[derive(Error, Debug)]
pub enum SetupError {
  #[error("'{0}' is not a valid variable name")]
  InvalidVariable(String),
  #[error("dependent and independent variable are both '{0}'")]
  SameVariables(String),
  #[error("{0} initial conditions given, at most 3 are allowed")]
  TooManyConditions(usize),
  #[error("invalid endpoint {endpoint}: {reason}")]
  InvalidEndpoint { endpoint: String, reason: String },
  #[error("rewrite rule error: {0}")]
  Pattern(#[from] regex::Error),
}
