//! Deferred-validation field state for wizard inputs
//!
//! A field keeps the text being typed apart from the last committed number.
//! Keystrokes only touch the draft; `commit` converts, clamps and publishes.

use super::{current_age_from_birth_year, MIN_BIRTH_YEAR};
use crate::assumptions::Bounds;

/// Numeric field with a draft string and a committed value
#[derive(Debug, Clone, PartialEq)]
pub struct DraftNumber {
    draft_text: String,
    committed_value: f64,
    bounds: Bounds,
}

impl DraftNumber {
    pub fn new(committed_value: f64, bounds: Bounds) -> Self {
        Self {
            draft_text: format_committed(committed_value),
            committed_value,
            bounds,
        }
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn committed_value(&self) -> f64 {
        self.committed_value
    }

    /// Replace the draft with typed text, keeping digits only
    pub fn input(&mut self, typed: &str) {
        self.draft_text = typed.chars().filter(char::is_ascii_digit).collect();
    }

    /// Focus left the field: parse, clamp and publish the draft
    ///
    /// An empty or unparsable draft keeps the previous committed value.
    /// Returns the committed value when it was updated.
    pub fn commit(&mut self) -> Option<f64> {
        if self.draft_text.trim().is_empty() {
            self.draft_text = format_committed(self.committed_value);
            return None;
        }
        let parsed: f64 = match self.draft_text.parse() {
            Ok(n) if f64::is_finite(n) => n,
            _ => {
                self.draft_text = format_committed(self.committed_value);
                return None;
            }
        };
        let clamped = self.bounds.clamp(parsed);
        self.committed_value = clamped;
        self.draft_text = format_committed(clamped);
        Some(clamped)
    }

    /// Externally reset the committed value, syncing the draft
    pub fn set(&mut self, value: f64) {
        self.committed_value = value;
        self.draft_text = format_committed(value);
    }
}

fn format_committed(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Birth-year field: at most four digits, cleared on blur when invalid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBirthYear {
    draft_text: String,
}

impl DraftBirthYear {
    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn input(&mut self, typed: &str) {
        self.draft_text = typed.chars().filter(char::is_ascii_digit).take(4).collect();
    }

    /// Keep the year when valid, otherwise clear the field
    pub fn commit(&mut self, now_year: i32) -> Option<i32> {
        match self.draft_text.parse::<i32>() {
            Ok(year) if (MIN_BIRTH_YEAR..=now_year).contains(&year) => {
                self.draft_text = year.to_string();
                Some(year)
            }
            _ => {
                self.draft_text.clear();
                None
            }
        }
    }

    /// Age derived from the current draft, if it parses to a valid year
    pub fn current_age(&self, now_year: i32) -> Option<u8> {
        self.draft_text
            .parse::<i32>()
            .ok()
            .and_then(|year| current_age_from_birth_year(year, now_year))
    }
}
