use serde::Deserialize;

/// Yahoo's `{ "raw": 1.0, "fmt": "1.00" }` number wrapper.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct RawNum<T> {
    pub(crate) raw: Option<T>,
}

pub fn from_raw<T>(raw: Option<RawNum<T>>) -> Option<T> {
    raw.and_then(|n| n.raw)
}

/// Unwraps a raw float, dropping NaN and infinities.
pub fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}
