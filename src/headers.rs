use crate::util::equals_ignore_case;
use indexmap::IndexMap;

/// Insertion-ordered header mapping. Later inserts of an existing name
/// overwrite the stored value in place.
pub type Headers = IndexMap<String, String>;

/// Case-insensitive lookup in a header mapping captured from the wire.
pub fn get_ignore_case<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| equals_ignore_case(key, name))
        .map(|(_, value)| value.as_str())
}

/// Free-form header tokens normalized into an ordered name→value mapping.
///
/// A token containing a colon splits on the first one only, with both sides
/// trimmed; a bare token becomes a name with an empty value. Duplicate names
/// are last-write-wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    headers: Headers,
}

impl HeaderSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut headers = Headers::new();
        for token in tokens {
            let token = token.as_ref();
            let (name, value) = match token.split_once(':') {
                Some((name, value)) => (name.trim(), value.trim()),
                None => (token.trim(), ""),
            };
            // Tokens with no name (",," artifacts) would never survive
            // request construction; drop them here.
            if name.is_empty() {
                continue;
            }
            headers.insert(name.to_string(), value.to_string());
        }

        Self { headers }
    }

    /// Parses a comma-delimited specification such as
    /// `"Content-Type:application/json,Authorization:Bearer abc123"`.
    pub fn from_list(list: &str) -> Self {
        Self::parse(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Header names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(String::as_str)
    }

    /// Comma-joined names for `Access-Control-Request-Headers`.
    ///
    /// Returns `None` when no headers were specified, so callers can omit the
    /// preflight header entirely instead of sending an empty value.
    pub fn request_names(&self) -> Option<String> {
        if self.headers.is_empty() {
            None
        } else {
            Some(self.names().collect::<Vec<_>>().join(","))
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        get_ignore_case(&self.headers, name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.headers.iter()
    }

    pub fn as_headers(&self) -> &Headers {
        &self.headers
    }

    pub fn into_headers(self) -> Headers {
        self.headers
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
