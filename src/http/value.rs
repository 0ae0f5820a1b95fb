//! Typed header and query-parameter values.
//!
//! Both [`HeaderValue`] and [`Param`] keep one canonical string form in sync with
//! whichever representation they were last set from (scalar, number or list).
//! The numeric reading of a scalar is parsed lazily on first access and cached
//! until the value is mutated.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::http::error::ValueError;

trait Numeric: Copy + PartialEq + fmt::Display + FromStr {}

impl Numeric for i64 {}
impl Numeric for f64 {}

#[derive(Debug, Clone, PartialEq)]
enum Repr<N> {
    Scalar,
    Number(N),
    List(Vec<String>),
}

#[derive(Debug, Clone)]
struct Coerced<N> {
    repr: Repr<N>,
    scalar: String,
    parsed: OnceLock<Option<N>>,
}

impl<N: Numeric> Coerced<N> {
    fn scalar(value: String) -> Self {
        Self {
            repr: Repr::Scalar,
            scalar: value,
            parsed: OnceLock::new(),
        }
    }

    fn number(value: N) -> Self {
        Self {
            repr: Repr::Number(value),
            scalar: value.to_string(),
            parsed: OnceLock::from(Some(value)),
        }
    }

    fn list(items: Vec<String>, separator: &str) -> Self {
        Self {
            scalar: items.join(separator),
            repr: Repr::List(items),
            parsed: OnceLock::new(),
        }
    }

    fn as_str(&self) -> &str {
        &self.scalar
    }

    fn as_number(&self) -> Result<N, ValueError> {
        self.parsed
            .get_or_init(|| self.scalar.trim().parse().ok())
            .ok_or_else(|| ValueError::NotNumeric(self.scalar.clone()))
    }

    fn as_list(&self) -> Vec<String> {
        match &self.repr {
            Repr::List(items) => items.clone(),
            Repr::Number(_) => vec![self.scalar.clone()],
            Repr::Scalar if self.scalar.trim().is_empty() => Vec::new(),
            Repr::Scalar => self
                .scalar
                .split(',')
                .map(|item| item.trim().to_string())
                .collect(),
        }
    }
}

/// The value of a single HTTP header.
///
/// # Example
///
/// ```
/// # use rawhttp::http::value::HeaderValue;
/// let allow = HeaderValue::from(vec!["GET", "POST"]);
/// assert_eq!(allow.as_str(), "GET, POST");
///
/// let length = HeaderValue::from(42_i64);
/// assert_eq!(length.as_int(), Ok(42));
/// assert_eq!(length, "42");
/// ```
#[derive(Debug, Clone)]
pub struct HeaderValue(Coerced<i64>);

impl HeaderValue {
    /// Separator used for the canonical form of list values.
    pub const LIST_SEPARATOR: &'static str = ", ";

    pub fn new(value: impl Into<String>) -> Self {
        Self(Coerced::scalar(value.into()))
    }

    pub fn from_int(value: i64) -> Self {
        Self(Coerced::number(value))
    }

    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        Self(Coerced::list(items, Self::LIST_SEPARATOR))
    }

    /// Canonical scalar form, as written on the wire.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_int(&self) -> Result<i64, ValueError> {
        self.0.as_number()
    }

    /// List form. Scalars are split on `,` with each element trimmed.
    pub fn as_list(&self) -> Vec<String> {
        self.0.as_list()
    }

    pub fn is_empty(&self) -> bool {
        self.0.scalar.is_empty()
    }

    pub fn set_str(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    pub fn set_int(&mut self, value: i64) {
        *self = Self::from_int(value);
    }

    pub fn set_list<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Self::from_list(items);
    }
}

impl Default for HeaderValue {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(items: Vec<String>) -> Self {
        Self::from_list(items)
    }
}

impl From<Vec<&str>> for HeaderValue {
    fn from(items: Vec<&str>) -> Self {
        Self::from_list(items)
    }
}

impl PartialEq for HeaderValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<str> for HeaderValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HeaderValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for HeaderValue {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<i64> for HeaderValue {
    fn eq(&self, other: &i64) -> bool {
        self.as_int().is_ok_and(|n| n == *other)
    }
}

/// The value of a single query parameter.
///
/// Same shape as [`HeaderValue`], but numeric coercion is floating point and
/// lists use a bare `,` separator as query strings do.
#[derive(Debug, Clone)]
pub struct Param(Coerced<f64>);

impl Param {
    pub const LIST_SEPARATOR: &'static str = ",";

    pub fn new(value: impl Into<String>) -> Self {
        Self(Coerced::scalar(value.into()))
    }

    pub fn from_number(value: f64) -> Self {
        Self(Coerced::number(value))
    }

    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        Self(Coerced::list(items, Self::LIST_SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_number(&self) -> Result<f64, ValueError> {
        self.0.as_number()
    }

    pub fn as_list(&self) -> Vec<String> {
        self.0.as_list()
    }

    pub fn set_str(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    pub fn set_number(&mut self, value: f64) {
        *self = Self::from_number(value);
    }

    pub fn set_list<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Self::from_list(items);
    }
}

impl Default for Param {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Self::from_number(value)
    }
}

impl From<Vec<String>> for Param {
    fn from(items: Vec<String>) -> Self {
        Self::from_list(items)
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<str> for Param {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Param {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for Param {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<f64> for Param {
    fn eq(&self, other: &f64) -> bool {
        self.as_number().is_ok_and(|n| n == *other)
    }
}
