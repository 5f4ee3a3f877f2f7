//! Collection views over the labels, attributes and adjacency of one vertex
//! or edge.
//!
//! Views are short-lived borrows of a [`Graph`](crate::Graph) that forward
//! every call to its store. Label and attribute views share the
//! [`LabelSet`] and [`AttributeMap`] traits so code can work on either kind
//! of owner.

mod adjacency;
mod data;
mod labels;

pub use adjacency::{InboundEdges, OutboundEdges};
pub use data::{EdgeData, VertexData};
pub use labels::{EdgeLabels, VertexLabels};

use vert_core::{Label, Value};
use vert_graph::StoreIter;

use crate::error::{Error, Result};

/// A lazy sequence produced by a graph or one of its views.
pub type Iter<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Convert a store iterator into a graph iterator, mapping each item.
pub(crate) fn lift<'a, T, U, F>(iter: StoreIter<'a, T>, mut f: F) -> Iter<'a, U>
where
    T: 'a,
    F: FnMut(T) -> U + 'a,
{
    Box::new(iter.map(move |item| item.map(&mut f).map_err(Error::from)))
}

/// The set of labels attached to one vertex or edge.
pub trait LabelSet {
    /// Whether the label is attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn contains(&self, label: &Label) -> Result<bool>;

    /// Every attached label, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn iter(&self) -> Result<Iter<'_, Label>>;

    /// The number of attached labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn len(&self) -> Result<usize>;

    /// Whether no label is attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Attach a label, creating the owner if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn add(&mut self, label: impl Into<Label>) -> Result<()>;

    /// Detach a label that must be attached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LabelNotFound`] if the label is not attached.
    fn remove(&mut self, label: &Label) -> Result<()> {
        if self.discard(label)? {
            Ok(())
        } else {
            Err(Error::LabelNotFound(label.clone()))
        }
    }

    /// Detach a label if it is attached. Returns whether it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn discard(&mut self, label: &Label) -> Result<bool>;
}

/// The attribute map of one vertex or edge.
pub trait AttributeMap {
    /// The value under `key`, or `None` if it is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// The value under `key`, which must be set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeNotFound`] if the key is not set.
    fn get_strict(&self, key: &str) -> Result<Value> {
        self.get(key)?.ok_or_else(|| Error::AttributeNotFound(key.to_owned()))
    }

    /// Whether `key` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn contains_key(&self, key: &str) -> Result<bool>;

    /// Set `key` to `value`, creating the owner if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written or cannot represent
    /// the value.
    fn insert(&mut self, key: &str, value: impl Into<Value>) -> Result<()>;

    /// Unset a key that must be set, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeNotFound`] if the key is not set.
    fn remove(&mut self, key: &str) -> Result<Value> {
        let value = self.get_strict(key)?;
        self.discard(key)?;
        Ok(value)
    }

    /// Unset `key` if it is set. Returns whether it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn discard(&mut self, key: &str) -> Result<bool>;

    /// Every set key, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn keys(&self) -> Result<Iter<'_, String>>;

    /// The number of set keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn len(&self) -> Result<usize>;

    /// Whether no key is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
