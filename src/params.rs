//! Path parameters extracted by the matcher.

/// Named path parameters for one request.
///
/// For a route `/users/:id`, a request to `/users/42` carries `id = "42"`.
/// Values are percent-decoded: `/users/john%20doe` gives `"john doe"`. A
/// value that does not decode to UTF-8 is kept as sent.
/// Every request owns its own `Params`; nothing is shared between concurrent
/// requests.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub(crate) fn from_match(params: &matchit::Params<'_, '_>) -> Self {
        Self(
            params
                .iter()
                .map(|(k, v)| {
                    let value = urlencoding::decode(v).map_or_else(|_| v.to_owned(), |d| d.into_owned());
                    (k.to_owned(), value)
                })
                .collect(),
        )
    }

    /// Returns the value captured for `name`, if the route declared it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}
