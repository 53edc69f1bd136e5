//! Turns the service's step-by-step text into markup for the display region.
//!
//! Math spans (`\[ ... \]` and `\( ... \)`) are handed to a typesetter
//! downstream, so their interiors must reach it byte for byte. They are
//! swapped for placeholders before the text passes run and put back
//! afterwards. Placeholder characters already present in the input are
//! shielded the same way, so they come back as they were.

use std::sync::LazyLock;

use regex::{Captures, Regex};

pub const HEADING_CLASS: &str = "text-gray-300 font-bold mt-4 mb-2";
pub const MATH_BLOCK_CLASS: &str =
  "my-3 p-2 bg-[#1a1a1a] rounded border border-[#3a3a3a]";

const SHIELD_OPEN: char = '\u{E000}';
const SHIELD_CLOSE: char = '\u{E001}';

static MATH_SPAN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\\\[(?s:.*?)\\\]|\\\(.*?\\\)|[\x{E000}\x{E001}]")
    .expect("math span pattern compiles")
});

static SHIELD: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new("\u{E000}([0-9]+)\u{E001}").expect("shield pattern compiles")
});

static STEP_HEADING: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*\*((?:Step|Paso).*?)\*\*")
    .expect("heading pattern compiles")
});

/// What to do with HTML-significant characters outside math spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HtmlPolicy {
  /// Inject the service text as-is.
  #[default]
  Trusted,
  /// Escape `& < > " '` in the prose before adding markup.
  EscapeText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MathKind {
  Block,
  Inline,
  /// A stray placeholder character from the input.
  Verbatim,
}

struct MathSpan {
  kind: MathKind,
  source: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
  policy: HtmlPolicy,
}

impl Renderer {
  pub fn new(policy: HtmlPolicy) -> Self {
    Renderer { policy }
  }

  pub fn policy(&self) -> HtmlPolicy {
    self.policy
  }

  pub fn render(&self, raw: &str) -> String {
    if raw.is_empty() {
      return String::new();
    }

    let (mut text, spans) = shield_math(raw);
    if self.policy == HtmlPolicy::EscapeText {
      text = escape_html(&text);
    }

    // Headings must see the original `**` delimiters.
    let heading = format!("<h3 class=\"{HEADING_CLASS}\">${{1}}</h3>");
    let text = STEP_HEADING.replace_all(&text, heading).into_owned();
    let text = text.replace("**", "");
    let text = text.replace("\r\n", "\n").replace('\n', "<br>");

    restore_math(&text, &spans)
  }
}

/// Render with [`HtmlPolicy::Trusted`].
pub fn render(raw: &str) -> String {
  Renderer::default().render(raw)
}

fn shield_math(raw: &str) -> (String, Vec<MathSpan>) {
  let mut spans = Vec::new();
  let text = MATH_SPAN
    .replace_all(raw, |caps: &Captures| {
      let source = caps[0].to_string();
      let kind = if source.starts_with(r"\[") {
        MathKind::Block
      } else if source.starts_with(r"\(") {
        MathKind::Inline
      } else {
        MathKind::Verbatim
      };
      spans.push(MathSpan { kind, source });
      format!("{SHIELD_OPEN}{}{SHIELD_CLOSE}", spans.len() - 1)
    })
    .into_owned();
  (text, spans)
}

/// Put every shielded span back: block math wrapped in its container,
/// inline math without padding, stray placeholder characters as they were.
/// One pass, so restored text is never scanned for placeholders again.
fn restore_math(text: &str, spans: &[MathSpan]) -> String {
  SHIELD
    .replace_all(text, |caps: &Captures| {
      let span = caps[1]
        .parse::<usize>()
        .ok()
        .and_then(|index| spans.get(index));
      match span {
        Some(MathSpan {
          kind: MathKind::Block,
          source,
        }) => format!("<div class=\"{MATH_BLOCK_CLASS}\">{source}</div>"),
        Some(MathSpan {
          kind: MathKind::Inline,
          source,
        }) => canonical_inline(source),
        Some(MathSpan {
          kind: MathKind::Verbatim,
          source,
        }) => source.clone(),
        None => caps[0].to_string(),
      }
    })
    .into_owned()
}

/// `\( x+1 \)` -> `\(x+1\)`. Drops at most one padding space per side.
fn canonical_inline(source: &str) -> String {
  let inner = &source[2..source.len() - 2];
  let inner = inner.strip_prefix(' ').unwrap_or(inner);
  let inner = inner.strip_suffix(' ').unwrap_or(inner);
  format!(r"\({inner}\)")
}

fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}
