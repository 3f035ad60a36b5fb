use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized equity ticker as understood by the chart endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        // Index tickers (^GSPC, ^VIX) carry a caret prefix.
        if let Some(first) = normalized.chars().next() {
            if !(first.is_ascii_alphabetic() || first == '^') {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate().skip(1) {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        if normalized.starts_with('^')
            && !normalized.chars().skip(1).any(|ch| ch.is_ascii_alphanumeric())
        {
            return Err(ValidationError::SymbolMissingTicker);
        }

        Ok(Self(normalized))
    }

    /// Wrap a literal already known to be a valid, uppercase ticker.
    pub(crate) fn from_static(symbol: &'static str) -> Self {
        debug_assert!(Self::parse(symbol).is_ok_and(|parsed| parsed.0 == symbol));
        Self(symbol.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used for output file names (`NVDA` -> `nvda`, `^GSPC` -> `gspc`).
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .filter(|ch| *ch != '^')
            .map(|ch| match ch {
                '.' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
