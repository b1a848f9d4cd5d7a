use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Conversion of a parameter value into its wire string.
///
/// Booleans render as `"1"`/`"0"`, integers as decimal, timestamps as unix seconds.
pub trait ParamValue {
    fn to_param(&self) -> String;
}

impl ParamValue for str {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> String {
        if *self { "1".into() } else { "0".into() }
    }
}

macro_rules! int_param {
    ($($t:ty),*) => {
        $(impl ParamValue for $t {
            fn to_param(&self) -> String {
                self.to_string()
            }
        })*
    };
}

int_param!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl ParamValue for DateTime<Utc> {
    fn to_param(&self) -> String {
        self.timestamp().to_string()
    }
}

/// The parameter map of one call, kept sorted by key.
///
/// Keys are compared bytewise, which for UTF-8 equals codepoint order; this is the
/// order both the signature and the cache key are computed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    map: BTreeMap<String, String>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ParamValue) {
        self.map.insert(key.into(), value.to_param());
    }

    /// Inserts `value` only when it is `Some`.
    pub fn insert_opt<V: ParamValue>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(v) = value {
            self.insert(key, v);
        }
    }

    /// Builder-style [`Params::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ParamValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the map as an `application/x-www-form-urlencoded` body.
    pub(crate) fn to_form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: ParamValue> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
