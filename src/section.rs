use indexmap::IndexMap;

/// A single `[section]` block: option names mapped to raw string values.
///
/// Options keep their insertion order so that writing a store back out is
/// deterministic and matches the order the options were first seen in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    options: IndexMap<String, String>,
}

impl Section {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            options: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, option: &str) -> Option<&str> {
        self.options.get(option).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.options.contains_key(option)
    }

    /// Iterate over option names in insertion order.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // Inserts or overwrites; the last write for a name wins.
    pub(crate) fn set(&mut self, option: String, value: String) {
        self.options.insert(option, value);
    }

    // Joins continuation text onto an existing value with a single '\n'.
    pub(crate) fn append_line(&mut self, option: &str, line: &str) {
        if let Some(value) = self.options.get_mut(option) {
            value.push('\n');
            value.push_str(line);
        }
    }

    pub(crate) fn remove(&mut self, option: &str) -> Option<String> {
        self.options.shift_remove(option)
    }
}
