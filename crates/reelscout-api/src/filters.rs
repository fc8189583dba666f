//! Ordered filter sets for paginated catalog resources.

use std::fmt;

use anyhow::{Result, bail};

/// An ordered mapping of filter name to value.
///
/// Two sets are equal only when they hold the same pairs in the same order,
/// since the order decides how the values map onto a resource path
/// (e.g. `trending/{category}/{duration}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSet {
    /// Name/value pairs in insertion order.
    entries: Vec<(String, String)>,
}

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets a filter value, keeping the original position of an existing name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a filter value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value of a filter, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the filter values as URL path segments, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is empty or contains `/`.
    pub fn path_segments(&self) -> Result<Vec<&str>> {
        self.entries
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    bail!("filter `{name}` has an empty value");
                }
                if value.contains('/') {
                    bail!("filter `{name}` contains '/': {value}");
                }
                Ok(value.as_str())
            })
            .collect()
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}
