//! Identifier types for the tick store
//!
//! `Symbol` is an inline, copyable security code so that hundreds of
//! millions of ticks per day do not each carry a heap allocation.
//! `BatchId` uses UUID v7 so append batches sort by arrival.

use crate::errors::SymbolError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum symbol length in characters.
pub const MAX_SYMBOL_LEN: usize = 17;

/// Security symbol (e.g., "AAPL", "BRK.B")
///
/// ASCII only, 1 to 17 characters. Ordering is lexicographic on the text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    // Zero padded; declared first so derived ordering is lexicographic.
    bytes: [u8; MAX_SYMBOL_LEN],
    len: u8,
}

impl Symbol {
    /// Create a symbol, validating length and character set.
    pub fn new(symbol: &str) -> Result<Self, SymbolError> {
        if symbol.is_empty() {
            return Err(SymbolError::Empty);
        }
        if !symbol.bytes().all(|b| b.is_ascii() && !b.is_ascii_control()) {
            return Err(SymbolError::InvalidCharacters {
                symbol: symbol.to_string(),
            });
        }
        if symbol.len() > MAX_SYMBOL_LEN {
            return Err(SymbolError::TooLong {
                symbol: symbol.to_string(),
                len: symbol.len(),
                max: MAX_SYMBOL_LEN,
            });
        }

        let mut bytes = [0u8; MAX_SYMBOL_LEN];
        bytes[..symbol.len()].copy_from_slice(symbol.as_bytes());
        Ok(Self {
            bytes,
            len: symbol.len() as u8,
        })
    }

    /// Get the symbol string
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = SymbolError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Symbol::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier for one appended batch
///
/// Uses UUID v7 for time-based sorting of load batches in logs and results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(Uuid);

impl BatchId {
    /// Create a new BatchId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new("AAPL").unwrap();
        assert_eq!(symbol.as_str(), "AAPL");
        assert_eq!(symbol.len(), 4);
        assert_eq!(symbol.to_string(), "AAPL");
    }

    #[test]
    fn test_symbol_max_length() {
        assert!(Symbol::new("ABCDEFGHIJKLMNOPQ").is_ok());
        let err = Symbol::new("ABCDEFGHIJKLMNOPQR").unwrap_err();
        assert_eq!(
            err,
            SymbolError::TooLong {
                symbol: "ABCDEFGHIJKLMNOPQR".to_string(),
                len: 18,
                max: MAX_SYMBOL_LEN,
            }
        );
    }

    #[test]
    fn test_symbol_rejects_empty_and_non_ascii() {
        assert_eq!(Symbol::new(""), Err(SymbolError::Empty));
        assert!(matches!(
            Symbol::new("ÄPL"),
            Err(SymbolError::InvalidCharacters { .. })
        ));
        assert!(matches!(
            Symbol::new("A\0B"),
            Err(SymbolError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn test_symbol_ordering_is_lexicographic() {
        let mut symbols: Vec<Symbol> = ["MSFT", "AAPL", "AA", "BRK.B", "A"]
            .iter()
            .map(|s| Symbol::new(s).unwrap())
            .collect();
        symbols.sort();
        let names: Vec<&str> = symbols.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["A", "AA", "AAPL", "BRK.B", "MSFT"]);
    }

    #[test]
    fn test_symbol_serialization() {
        let symbol = Symbol::new("BRK.B").unwrap();
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"BRK.B\"");

        let deserialized: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(symbol, deserialized);

        let too_long: Result<Symbol, _> = serde_json::from_str("\"ABCDEFGHIJKLMNOPQRS\"");
        assert!(too_long.is_err());
    }

    #[test]
    fn test_batch_id_creation() {
        let id1 = BatchId::new();
        let id2 = BatchId::new();
        assert_ne!(id1, id2, "BatchIds should be unique");
    }

    #[test]
    fn test_batch_id_serialization() {
        let id = BatchId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: BatchId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
