//! Rewrites informal calculus shorthand into the canonical equation syntax
//! accepted by the solving service.
//!
//! The rewrite is an ordered list of [`RewriteRule`]s. Each rule is applied to
//! the whole string before the next one runs:
//!
//! 1. `√(...)`      -> `sqrt(...)`
//! 2. `√x`          -> `sqrt(x)`
//! 3. `√`           -> `sqrt`
//! 4. `y'''`        -> `d^3/dx^3(y)`
//! 5. `y''`         -> `d^2/dx^2(y)`
//! 6. `y'`          -> `d/dx(y)`
//! 7. `d/dx y`      -> `d/dx(y)`
//!
//! Rules 4 to 6 are prefixes of each other. `y'` matches the first two
//! characters of `y''` and `y''` the first three of `y'''`, so the tick rules
//! must run from the highest order down. Swapping them turns `y''` into
//! `d/dx(y)'`.
//!
//! Tick rules fire wherever the variable is followed by ticks, so implicit
//! products such as `xy'` become `xd/dx(y)` and no tick survives.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::SetupError;

/// Variable names used when expanding derivative shorthand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notation {
  /// Function being differentiated, `y` in `y''`.
  pub dependent: String,
  /// Variable of differentiation, `x` in `d/dx`.
  pub independent: String,
}

impl Default for Notation {
  fn default() -> Self {
    Notation {
      dependent: "y".to_string(),
      independent: "x".to_string(),
    }
  }
}

impl Notation {
  pub fn new(
    dependent: impl Into<String>,
    independent: impl Into<String>,
  ) -> Result<Self, SetupError> {
    let notation = Notation {
      dependent: dependent.into(),
      independent: independent.into(),
    };
    for name in [&notation.dependent, &notation.independent] {
      if !is_identifier(name) {
        return Err(SetupError::InvalidVariable(name.clone()));
      }
    }
    if notation.dependent == notation.independent {
      return Err(SetupError::SameVariables(notation.dependent));
    }
    Ok(notation)
  }
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) if first.is_ascii_alphabetic() => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false,
  }
}

/// A single `(pattern, replacement)` step of the normalizer.
#[derive(Debug, Clone)]
pub struct RewriteRule {
  name: &'static str,
  pattern: Regex,
  replacement: String,
  /// Skip matches that continue an identifier to their left (`and/dx y`).
  standalone: bool,
}

impl RewriteRule {
  fn new(
    name: &'static str,
    pattern: &str,
    replacement: String,
    standalone: bool,
  ) -> Result<Self, SetupError> {
    Ok(RewriteRule {
      name,
      pattern: Regex::new(pattern)?,
      replacement,
      standalone,
    })
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Rewrite every match of this rule in `input`.
  pub fn apply(&self, input: &str) -> String {
    if !self.standalone {
      return self
        .pattern
        .replace_all(input, self.replacement.as_str())
        .into_owned();
    }

    self
      .pattern
      .replace_all(input, |caps: &Captures| {
        let start = caps.get(0).map_or(0, |m| m.start());
        if continues_identifier(input, start) {
          caps[0].to_string()
        } else {
          let mut out = String::new();
          caps.expand(&self.replacement, &mut out);
          out
        }
      })
      .into_owned()
  }
}

/// True if the text right before `start` is the tail of an identifier.
/// A purely numeric run (`2y'`) is a coefficient, not an identifier.
fn continues_identifier(haystack: &str, start: usize) -> bool {
  haystack[..start]
    .chars()
    .rev()
    .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
    .any(|c| !c.is_ascii_digit())
}

/// Ordered rewrite pipeline for one [`Notation`].
#[derive(Debug, Clone)]
pub struct Normalizer {
  notation: Notation,
  rules: Vec<RewriteRule>,
}

impl Normalizer {
  pub fn new(notation: Notation) -> Result<Self, SetupError> {
    let dep = regex::escape(&notation.dependent);
    let indep = regex::escape(&notation.independent);
    let y = &notation.dependent;
    let x = &notation.independent;

    let rules = vec![
      RewriteRule::new("root-group", r"√\s*\(", "sqrt(".to_string(), false)?,
      RewriteRule::new(
        "root-token",
        r"√\s*([A-Za-z0-9_]+)",
        "sqrt(${1})".to_string(),
        false,
      )?,
      RewriteRule::new("root-bare", "√", "sqrt".to_string(), false)?,
      // Highest order first, see the module docs.
      RewriteRule::new(
        "third-derivative",
        &format!("{dep}'''"),
        format!("d^3/d{x}^3({y})"),
        false,
      )?,
      RewriteRule::new(
        "second-derivative",
        &format!("{dep}''"),
        format!("d^2/d{x}^2({y})"),
        false,
      )?,
      RewriteRule::new(
        "first-derivative",
        &format!("{dep}'"),
        format!("d/d{x}({y})"),
        false,
      )?,
      RewriteRule::new(
        "operator-application",
        &format!(
          r"(d(?:\^[0-9]+)?/d{indep}(?:\^[0-9]+)?)\s+([A-Za-z][A-Za-z0-9_]*)"
        ),
        "${1}(${2})".to_string(),
        true,
      )?,
    ];

    Ok(Normalizer { notation, rules })
  }

  pub fn notation(&self) -> &Notation {
    &self.notation
  }

  /// The rules in the order [`Normalizer::normalize`] applies them.
  pub fn rules(&self) -> &[RewriteRule] {
    &self.rules
  }

  /// Canonicalize `raw`. Input without shorthand passes through unchanged.
  pub fn normalize(&self, raw: &str) -> String {
    self
      .rules
      .iter()
      .fold(raw.to_string(), |equation, rule| rule.apply(&equation))
  }
}

impl Default for Normalizer {
  fn default() -> Self {
    DEFAULT_NORMALIZER.clone()
  }
}

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(|| {
  Normalizer::new(Notation::default())
    .expect("built-in rewrite rules for y/x compile")
});

/// Canonicalize `raw` using the default `y`/`x` notation.
pub fn normalize(raw: &str) -> String {
  DEFAULT_NORMALIZER.normalize(raw)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numeric_coefficient_is_not_an_identifier() {
    assert!(!continues_identifier("2y'", 1));
    assert!(continues_identifier("x2y'", 2));
    assert!(!continues_identifier("(y'", 1));
  }

  #[test]
  fn identifier_check() {
    assert!(is_identifier("t"));
    assert!(is_identifier("u_1"));
    assert!(!is_identifier("1u"));
    assert!(!is_identifier(""));
  }
}
