//! What the display region and the notification area show after a
//! submission.

use chrono::{DateTime, Duration, Utc};

use crate::orchestrator::Solution;
use crate::SubmissionError;

pub const PLACEHOLDER_PROMPT: &str =
  "Enter a differential equation and press Solve";
pub const SUCCESS_MESSAGE: &str = "Equation processed successfully";
pub const EXAMPLE_APPLIED_MESSAGE: &str = "Example applied to the input";

/// How long a toast stays visible.
pub const TOAST_LIFETIME_MS: i64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
  Success,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
  pub message: String,
  pub kind: ToastKind,
  pub issued_at: DateTime<Utc>,
}

impl Toast {
  pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
    Toast {
      message: message.into(),
      kind,
      issued_at: Utc::now(),
    }
  }

  pub fn success(message: impl Into<String>) -> Self {
    Self::new(ToastKind::Success, message)
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self::new(ToastKind::Error, message)
  }

  pub fn expires_at(&self) -> DateTime<Utc> {
    self.issued_at + Duration::milliseconds(TOAST_LIFETIME_MS)
  }

  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    now >= self.expires_at()
  }
}

/// Markup for the display region and the toast to raise alongside it.
#[derive(Debug, Clone)]
pub struct Presentation {
  pub markup: String,
  pub toast: Toast,
}

/// Prompt shown in the display region when there is no solution.
pub fn placeholder() -> String {
  format!(
    "<div class=\"text-center py-8 text-gray-600\">\
     <p class=\"text-sm\">{PLACEHOLDER_PROMPT}</p></div>"
  )
}

/// Every error kind looks the same to the user: the placeholder comes back
/// and the toast carries the error's message.
pub fn present(outcome: &Result<Solution, SubmissionError>) -> Presentation {
  match outcome {
    Ok(solution) => Presentation {
      markup: solution.markup.clone(),
      toast: Toast::success(SUCCESS_MESSAGE),
    },
    Err(err) => Presentation {
      markup: placeholder(),
      toast: Toast::error(err.to_string()),
    },
  }
}

/// Standalone HTML document around `markup` that typesets math with MathJax.
pub fn page(title: &str, markup: &str) -> String {
  let title = title
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;");
  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.tailwindcss.com"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
</head>
<body class="bg-[#121212] text-gray-200 p-6">
<main id="solutionOutput">
{markup}
</main>
</body>
</html>
"#
  )
}
