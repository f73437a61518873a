use std::collections::BTreeSet;

use smol_str::SmolStr;

/// Named string formats the API schema refers to (`date-time`, `int64`, ...).
///
/// Writers receive it alongside the request. The list endpoint's parameters
/// are plain strings and integers, so it only travels through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    formats: BTreeSet<SmolStr>,
}

impl Registry {
    /// Whether `name` is a known format.
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains(name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            formats: ["byte", "date-time", "int32", "int64", "uri"]
                .into_iter()
                .map(SmolStr::new_static)
                .collect(),
        }
    }
}
