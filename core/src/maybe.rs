//! # Maybe: Presence as Data
//!
//! `Maybe<T>` is either present (holds exactly one value) or absent.
//! It wraps `Option<T>` and adds the contract the rest of the crate relies on:
//! reading an absent value is a [`ContractError`], not a silent default.

use crate::error::{ContractError, ContractResult};
use crate::metadata::short_type_name;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// An optional value.
///
/// Absent sorts strictly before any present value; two present values
/// compare by the values themselves.
///
/// Serialized as `{"value": ..}` when present and `null` when absent, so a
/// present-of-absent `Maybe<Maybe<T>>` survives a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Maybe<T>(Option<T>);

#[derive(Serialize)]
struct PresentRef<'a, T> {
    value: &'a T,
}

#[derive(Deserialize)]
struct Present<T> {
    value: T,
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0
            .as_ref()
            .map(|value| PresentRef { value })
            .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let present = Option::<Present<T>>::deserialize(deserializer)?;
        Ok(Maybe(present.map(|present| present.value)))
    }
}

impl<T> Maybe<T> {
    /// The canonical empty instance.
    pub const fn none() -> Self {
        Maybe(None)
    }

    /// A present value.
    pub const fn some(value: T) -> Self {
        Maybe(Some(value))
    }

    /// Build a present value from an input that must not be absent.
    ///
    /// Fails with [`ContractError::ArgumentNull`] when `value` is `None`.
    pub fn try_some(value: Option<T>) -> ContractResult<Self> {
        match value {
            Some(value) => Ok(Maybe(Some(value))),
            None => Err(ContractError::ArgumentNull { argument: "value" }),
        }
    }

    /// Lift a plain `Option`: `None` becomes the empty instance.
    pub fn from_option(value: Option<T>) -> Self {
        Maybe(value)
    }

    pub fn has_value(&self) -> bool {
        self.0.is_some()
    }

    pub fn has_no_value(&self) -> bool {
        self.0.is_none()
    }

    /// A `Maybe` is truthy iff it is present.
    pub fn is_truthy(&self) -> bool {
        self.has_value()
    }

    /// Borrow the value, or fail with [`ContractError::NoValue`].
    pub fn value(&self) -> ContractResult<&T> {
        self.0
            .as_ref()
            .ok_or_else(|| ContractError::no_value::<T>("Maybe"))
    }

    pub fn into_value(self) -> ContractResult<T> {
        self.0.ok_or_else(|| ContractError::no_value::<T>("Maybe"))
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        Maybe(self.0.as_ref())
    }

    pub fn as_option(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }

    pub fn map<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        Maybe(self.0.map(f))
    }

    pub fn bind<U, F>(self, f: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self.0 {
            Some(value) => f(value),
            None => Maybe::none(),
        }
    }

    /// Keep the value only if it satisfies `predicate`.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        Maybe(self.0.filter(predicate))
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.0.unwrap_or(default)
    }

    pub fn unwrap_or_else<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.0.unwrap_or_else(default)
    }

    /// Run `f` on the value if present; returns `self` unchanged.
    pub fn if_some<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Some(value) = &self.0 {
            f(value);
        }
        self
    }

    /// Run `f` if absent; returns `self` unchanged.
    pub fn if_none<F>(self, f: F) -> Self
    where
        F: FnOnce(),
    {
        if self.0.is_none() {
            f();
        }
        self
    }

    /// Exhaustive fold: exactly one branch runs.
    pub fn match_with<U, S, N>(self, some: S, none: N) -> U
    where
        S: FnOnce(T) -> U,
        N: FnOnce() -> U,
    {
        match self.0 {
            Some(value) => some(value),
            None => none(),
        }
    }

    /// `self` if present, otherwise the lazily computed alternative.
    pub fn or_else<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Maybe<T>,
    {
        if self.has_value() { self } else { f() }
    }

    /// Presence-gated AND: `self` when absent, otherwise `other`.
    ///
    /// Values are never combined; this selects one operand by truthiness.
    pub fn and(self, other: Maybe<T>) -> Maybe<T> {
        if self.is_truthy() { other } else { self }
    }

    /// Presence-gated OR: `self` when present, otherwise `other`.
    pub fn or(self, other: Maybe<T>) -> Maybe<T> {
        if self.is_truthy() { self } else { other }
    }

    pub fn iter(&self) -> std::option::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T> Maybe<Maybe<T>> {
    /// Collapse one level of nesting.
    ///
    /// Absent-of-anything and present-of-absent both become absent.
    pub fn flatten(self) -> Maybe<T> {
        match self.0 {
            Some(inner) => inner,
            None => Maybe::none(),
        }
    }
}

impl<T: Ord + 'static> Maybe<T> {
    /// Compare against a `Maybe` whose parameterization is only known at runtime.
    ///
    /// Fails with [`ContractError::InvalidState`] when `other` is not a
    /// `Maybe<T>`.
    pub fn try_cmp_dyn(&self, other: &dyn Any) -> ContractResult<Ordering> {
        match other.downcast_ref::<Maybe<T>>() {
            Some(other) => Ok(self.cmp(other)),
            None => Err(ContractError::InvalidState(format!(
                "cannot compare Maybe<{}> with a value of a different type",
                short_type_name::<T>()
            ))),
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::none()
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Maybe(value)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        value.0
    }
}

impl<T> BitAnd for Maybe<T> {
    type Output = Maybe<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<T> BitOr for Maybe<T> {
    type Output = Maybe<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<T> IntoIterator for Maybe<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("None"),
        }
    }
}
