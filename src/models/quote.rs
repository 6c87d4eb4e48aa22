use serde::{Deserialize, Serialize};

/// a quotation body and its free-form category label.
///
/// two quotes are the same quote iff both fields match exactly,
/// case-sensitive and whitespace-sensitive. there is no separate id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
        }
    }

    /// light schema check applied at the load and import boundaries.
    pub fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty() && !self.category.trim().is_empty()
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" — {}", self.text, self.category)
    }
}
