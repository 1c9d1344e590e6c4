/// Attribute mapping for markup elements.
use smallvec::SmallVec;

/// Attributes of one element, keyed by local name (namespace prefix dropped).
///
/// Entries are kept sorted by name so lookups never depend on the order the
/// attributes appeared in the markup. When two prefixed attributes share a
/// local name, the first one encountered is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: SmallVec<[(String, String); 4]>,
}

impl Attributes {
    /// Create an empty attribute mapping.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute. Qualified names such as `w:color` are stored under
    /// their local name. Returns `false` if the local name was already present.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> bool {
        let local = local_name(name);
        match self.entries.binary_search_by(|(k, _)| k.as_str().cmp(local)) {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(pos, (local.to_string(), value.into()));
                true
            },
        }
    }

    /// Get an attribute value by local name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(name))
            .ok()
            .map(|pos| self.entries[pos].1.as_str())
    }

    /// Check whether an attribute is present.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(local name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip a namespace prefix from a qualified name.
#[inline]
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
