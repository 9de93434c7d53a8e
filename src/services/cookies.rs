/*
 * Responsibility
 * - `Cookie` ヘッダ文字列 → name/value の map への変換
 * - デコードやエスケープ解除は行わない (値はそのまま)
 */
use std::collections::HashMap;

/// Header name looked up verbatim (API Gateway forwards it as `Cookie`).
pub const COOKIE_HEADER: &str = "Cookie";

/// Cookies sent with a single request.
///
/// A value is `None` when its segment carried no `=` (e.g. `"flag"` in `"a=1; flag"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieMap(HashMap<String, Option<String>>);

impl CookieMap {
    /// Value of `name`, if the cookie is present and has one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_deref())
    }

    /// Raw entry for `name`: `Some(None)` means the cookie was sent without `=`.
    pub fn entry(&self, name: &str) -> Option<Option<&str>> {
        self.0.get(name).map(|v| v.as_deref())
    }
}

/// Parse the `Cookie` header out of a request header map.
///
/// Returns `None` (not an empty map) when there are no headers, no `Cookie`
/// header, or the header is empty.
pub fn parse_cookies(headers: Option<&HashMap<String, String>>) -> Option<CookieMap> {
    let raw = headers?.get(COOKIE_HEADER)?;
    if raw.is_empty() {
        return None;
    }

    let mut cookies = HashMap::new();
    for segment in raw.split(';') {
        let segment = segment.trim();
        let (name, value) = match segment.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (segment, None),
        };
        cookies.insert(name.to_string(), value);
    }

    Some(CookieMap(cookies))
}
