//! Structural element selector.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Path-based identifier of one element within a single page snapshot.
///
/// Built bottom-up from the document root, e.g. `/html/body/div[2]/button`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(String);

impl Selector {
    /// Wrap an already-built path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrow the path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying path.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Last path segment, e.g. `div[2]`.
    pub fn leaf(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Selector {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_selector_leaf() {
        let selector = Selector::new("/html/body/div[2]/button");
        assert_eq!(selector.leaf(), "button");
        assert_eq!(Selector::new("/html").leaf(), "html");
    }

    #[test]
    fn test_selector_serializes_as_string() {
        let selector = Selector::from("/html/body");
        let json = serde_json::to_string(&selector).unwrap();
        assert_eq!(json, "\"/html/body\"");

        let back: Selector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selector);
    }

    #[test]
    fn test_selector_map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Selector::from("/html/body"), 1);
        assert_eq!(map.get("/html/body"), Some(&1));
    }
}
