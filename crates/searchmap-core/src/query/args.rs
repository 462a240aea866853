use super::Arg;

use indexmap::IndexMap;

/// Named values supplied when binding a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: IndexMap<String, Arg>,
}

impl Args {
    pub fn new() -> Args {
        Args::default()
    }

    /// Sets `name`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Arg>) -> &mut Args {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Chaining form of [`Args::insert`].
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Arg>) -> Args {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Arg>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}
