//! Structs: ordered sequences of named fields.
//!
//! Field names are not unique; lookups return the first match. The binary encoding of a
//! struct holds only the field values, so decoding one needs the struct's [`Type`].

use crate::{
    kind::Kind,
    types::{StructType, Type, TypeField},
    Value,
};
use std::{fmt, iter::FromIterator, slice, vec};

#[derive(Clone, Debug, PartialEq, Default)]
/// A single named field of a [`Struct`].
pub struct StructField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: Value,
}

impl StructField {
    /// Creates a field.
    pub fn new<S: Into<String>, V: Into<Value>>(name: S, value: V) -> Self {
        StructField {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
/// An ordered sequence of named fields.
pub struct Struct(Vec<StructField>);

impl Struct {
    /// Creates a struct from its fields, keeping their order.
    pub fn new(fields: Vec<StructField>) -> Self { Struct(fields) }

    /// Returns the value of the first field called `name`.
    ///
    /// # Arguments
    ///
    /// * `name: &str` - The field to look up.
    ///
    /// # Example
    ///
    /// ```
    /// use pack::prelude::*;
    ///
    /// let s = Struct::from_iter(vec![("foo", Value::from(U8::new(1)))]);
    ///
    /// assert_eq!(s.get("foo"), Some(&Value::from(U8::new(1))));
    /// assert_eq!(s.get("bar"), None);
    /// ```
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Replaces the value of the first field called `name`, returning the previous
    /// value. Does nothing, and returns `None`, when there is no such field.
    ///
    /// # Arguments
    ///
    /// * `name: &str` - The field to replace.
    /// * `value: Value` - The new value.
    ///
    /// # Example
    ///
    /// ```
    /// use pack::prelude::*;
    ///
    /// let mut s = Struct::from_iter(vec![("foo", Value::from(true))]);
    ///
    /// assert_eq!(s.set("foo", Value::from(false)), Some(Value::from(true)));
    /// assert_eq!(s.set("bar", Value::from(false)), None);
    ///
    /// assert_eq!(s.len(), 1);
    /// assert_eq!(s.get("foo"), Some(&Value::from(false)));
    /// ```
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.0
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| std::mem::replace(&mut f.value, value))
    }

    /// The [`Type`] of this struct: each field's name and type, in field order.
    pub fn ty(&self) -> Type { Type::Struct(self.struct_type()) }

    /// Like [`Struct::ty`], without the [`Type`] wrapper.
    pub fn struct_type(&self) -> StructType {
        self.0
            .iter()
            .map(|f| TypeField::new(f.name.clone(), f.value.ty()))
            .collect()
    }

    /// Always [`Kind::Struct`].
    pub fn kind(&self) -> Kind { Kind::Struct }

    /// The fields, in order.
    pub fn fields(&self) -> &[StructField] { &self.0 }

    /// Number of fields.
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the struct has no fields.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> slice::Iter<StructField> { self.0.iter() }

    /// Appends a field, without checking for an existing field of the same name.
    pub fn push<S: Into<String>, V: Into<Value>>(&mut self, name: S, value: V) {
        self.0.push(StructField::new(name, value))
    }

    /// Unwraps the fields.
    pub fn into_fields(self) -> Vec<StructField> { self.0 }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Struct {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Struct(
            iter.into_iter()
                .map(|(name, value)| StructField::new(name, value))
                .collect(),
        )
    }
}

impl FromIterator<StructField> for Struct {
    fn from_iter<I: IntoIterator<Item = StructField>>(iter: I) -> Self { Struct(iter.into_iter().collect()) }
}

impl IntoIterator for Struct {
    type IntoIter = vec::IntoIter<StructField>;
    type Item = StructField;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a Struct {
    type IntoIter = slice::Iter<'a, StructField>;
    type Item = &'a StructField;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{U16, U8};

    fn sample() -> Struct {
        Struct::from_iter(vec![
            ("a", Value::from(U8::new(1))),
            ("b", Value::from("hello")),
            ("a", Value::from(U16::new(2))),
        ])
    }

    #[test]
    fn get_returns_first_match() {
        assert_eq!(sample().get("a"), Some(&Value::from(U8::new(1))));
    }

    #[test]
    fn set_is_noop_for_missing_fields() {
        let mut s = sample();
        assert_eq!(s.set("c", Value::Bool(true)), None);
        assert_eq!(s, sample());
    }

    #[test]
    fn type_follows_field_order() {
        let ty = sample().struct_type();
        let names: Vec<&str> = ty.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(ty.fields()[2].ty, Type::U16);

        let swapped = Struct::from_iter(vec![
            ("b", Value::from("hello")),
            ("a", Value::from(U8::new(1))),
        ]);
        let original = Struct::from_iter(vec![
            ("a", Value::from(U8::new(1))),
            ("b", Value::from("hello")),
        ]);
        assert!(!swapped.ty().equals(&original.ty()));
    }

    #[test]
    fn display_is_json() {
        let s = Struct::from_iter(vec![("x", Value::from(U8::new(9)))]);
        assert_eq!(s.to_string(), r#"{"x":"9"}"#);
    }
}
