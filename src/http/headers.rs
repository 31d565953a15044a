/// Header map with ASCII case-insensitive names.
///
/// Names keep the spelling they were inserted with, which is what gets
/// written on the wire. Lookups compare a lower-cased form. Iteration follows
/// insertion order; re-inserting an existing name replaces the entry in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<HeaderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    key: String,
    name: String,
    value: String,
}

fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any earlier value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let key = normalize(&name);

        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.name = name;
                entry.value = value;
            }
            None => self.entries.push(HeaderEntry { key, name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let key = normalize(name);
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let key = normalize(name);
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index).value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderMap
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_wins_and_keeps_position() {
        let mut headers = HeaderMap::new();
        headers.insert("Host", "a");
        headers.insert("Accept", "*/*");
        headers.insert("host", "b");

        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(pairs, vec![("host", "b"), ("Accept", "*/*")]);
    }
}
