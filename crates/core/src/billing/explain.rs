//! Amounts paired with a human-readable rationale.

use serde::Serialize;

/// A computed value and, when the rule is not self-explanatory, why it has that value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Explained<T> {
    /// The computed value.
    pub value: T,
    /// Rationale for the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl<T> Explained<T> {
    /// A value whose rule needs no explanation.
    #[must_use]
    pub const fn plain(value: T) -> Self {
        Self {
            value,
            reason: None,
        }
    }

    /// A value with a rationale.
    #[must_use]
    pub const fn because(value: T, reason: &'static str) -> Self {
        Self {
            value,
            reason: Some(reason),
        }
    }

    /// Discards the rationale.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Applies `f` to the value, keeping the rationale.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Explained<U> {
        Explained {
            value: f(self.value),
            reason: self.reason,
        }
    }
}
