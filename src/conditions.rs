//! Initial-condition slots attached to a submission.

use crate::SetupError;

/// Smallest number of condition slots a set can shrink to.
pub const MIN_CONDITIONS: usize = 1;
/// Largest number of condition slots a set can grow to.
pub const MAX_CONDITIONS: usize = 3;

/// Enabled state of the add/remove controls, derived after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
  pub can_add: bool,
  pub can_remove: bool,
}

/// Ordered list of free-text condition slots (`y(0)=1`, ...).
///
/// Always holds between [`MIN_CONDITIONS`] and [`MAX_CONDITIONS`] slots.
/// Out-of-range operations clamp silently instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSet {
  slots: Vec<String>,
}

impl Default for ConditionSet {
  fn default() -> Self {
    Self::new()
  }
}

impl ConditionSet {
  /// A set with a single empty slot.
  pub fn new() -> Self {
    ConditionSet {
      slots: vec![String::new()],
    }
  }

  /// Build a set from already collected inputs, one slot per input.
  pub fn from_inputs<I, S>(inputs: I) -> Result<Self, SetupError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let slots: Vec<String> = inputs.into_iter().map(Into::into).collect();
    if slots.len() > MAX_CONDITIONS {
      return Err(SetupError::TooManyConditions(slots.len()));
    }
    if slots.is_empty() {
      return Ok(Self::new());
    }
    Ok(ConditionSet { slots })
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  /// Never true; a set keeps at least one slot.
  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  /// Raw slot contents, untrimmed, including empty slots.
  pub fn slots(&self) -> &[String] {
    &self.slots
  }

  /// Append an empty slot unless the set is full.
  pub fn add(&mut self) -> Controls {
    if self.slots.len() < MAX_CONDITIONS {
      self.slots.push(String::new());
    }
    self.controls()
  }

  /// Drop the most recently added slot unless only one is left.
  pub fn remove(&mut self) -> Controls {
    if self.slots.len() > MIN_CONDITIONS {
      self.slots.pop();
    }
    self.controls()
  }

  /// Overwrite the text of slot `index`. Returns `false` if there is no such
  /// slot.
  pub fn set(&mut self, index: usize, text: impl Into<String>) -> bool {
    match self.slots.get_mut(index) {
      Some(slot) => {
        *slot = text.into();
        true
      }
      None => false,
    }
  }

  pub fn controls(&self) -> Controls {
    Controls {
      can_add: self.slots.len() < MAX_CONDITIONS,
      can_remove: self.slots.len() > MIN_CONDITIONS,
    }
  }

  /// Trimmed, non-empty slot contents in insertion order.
  pub fn values(&self) -> Vec<String> {
    self
      .slots
      .iter()
      .map(|slot| slot.trim())
      .filter(|value| !value.is_empty())
      .map(str::to_string)
      .collect()
  }
}
