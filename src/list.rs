//! Homogeneous lists.
//!
//! A list carries its element [`Type`] explicitly, so an empty list still knows what it
//! would hold. Lists built from elements infer the type from the first element and
//! reject anything that does not match it.
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! let list = List::new(vec![Value::from(U8::new(1)), Value::from(U8::new(2))]).unwrap();
//! assert_eq!(list.elem_type(), &Type::U8);
//!
//! // mixed element types are rejected
//! let mixed = List::new(vec![Value::from(U8::new(1)), Value::from(true)]);
//! assert!(mixed.is_err());
//!
//! // an empty list needs its element type up front
//! let empty = List::empty(Type::String);
//! assert!(empty.is_empty());
//! assert_eq!(empty.ty(), Type::List(Box::new(Type::String)));
//! ```

use crate::{errors::ConversionError, kind::Kind, types::Type, Value};
use std::{fmt, slice, vec};

#[derive(Clone, Debug, PartialEq, Default)]
/// A sequence of values that all share one [`Type`].
pub struct List {
    elem_type: Type,
    elems: Vec<Value>,
}

impl List {
    /// Builds a list from at least one element.
    ///
    /// # Errors
    ///
    /// Fails with [`ConversionError::EmptyList`] when `elems` is empty,
    /// [`ConversionError::NilElement`] when the elements are nil, and
    /// [`ConversionError::InconsistentListType`] when any element's type differs from
    /// the first element's.
    pub fn new(elems: Vec<Value>) -> Result<List, ConversionError> {
        let elem_type = match elems.first() {
            Some(first) => first.ty(),
            None => return Err(ConversionError::EmptyList),
        };

        if elem_type.kind() == Kind::Nil {
            return Err(ConversionError::NilElement);
        }

        for elem in elems.iter().skip(1) {
            let got = elem.ty();
            if !got.equals(&elem_type) {
                return Err(ConversionError::InconsistentListType {
                    expected: elem_type,
                    got,
                });
            }
        }

        Ok(List { elem_type, elems })
    }

    /// An empty list of `elem_type`.
    ///
    /// # Arguments
    ///
    /// * `elem_type: Type` - The type the list would hold.
    pub fn empty(elem_type: Type) -> List {
        List {
            elem_type,
            elems: Vec::new(),
        }
    }

    /// Builds a list without checking the elements against `elem_type`. Decoders
    /// produce elements of `elem_type` by construction.
    pub(crate) fn from_parts(elem_type: Type, elems: Vec<Value>) -> List { List { elem_type, elems } }

    /// The shared element type.
    pub fn elem_type(&self) -> &Type { &self.elem_type }

    /// The type of this list, `Type::List(elem_type)`.
    pub fn ty(&self) -> Type { Type::List(Box::new(self.elem_type.clone())) }

    /// Always [`Kind::List`].
    pub fn kind(&self) -> Kind { Kind::List }

    /// The elements, in order.
    pub fn elems(&self) -> &[Value] { &self.elems }

    /// Number of elements.
    pub fn len(&self) -> usize { self.elems.len() }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool { self.elems.is_empty() }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> { self.elems.get(index) }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> slice::Iter<Value> { self.elems.iter() }

    /// Appends an element, checking it against the element type.
    ///
    /// # Errors
    ///
    /// Fails with [`ConversionError::InconsistentListType`] when the element's type
    /// differs from the list's.
    pub fn push(&mut self, elem: Value) -> Result<(), ConversionError> {
        let got = elem.ty();
        if got.equals(&self.elem_type) {
            self.elems.push(elem);
            Ok(())
        } else {
            Err(ConversionError::InconsistentListType {
                expected: self.elem_type.clone(),
                got,
            })
        }
    }

    /// Splits the list into its element type and elements.
    pub fn into_parts(self) -> (Type, Vec<Value>) { (self.elem_type, self.elems) }
}

impl IntoIterator for List {
    type IntoIter = vec::IntoIter<Value>;
    type Item = Value;

    fn into_iter(self) -> Self::IntoIter { self.elems.into_iter() }
}

impl<'a> IntoIterator for &'a List {
    type IntoIter = slice::Iter<'a, Value>;
    type Item = &'a Value;

    fn into_iter(self) -> Self::IntoIter { self.elems.iter() }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
