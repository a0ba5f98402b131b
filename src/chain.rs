//! Singly linked list holding the entries of one chained bucket

use std::fmt;

use crate::entry::Entry;

/// A link in a [`Chain`]
#[derive(Debug)]
struct Node<V> {
    /// The stored entry
    entry: Entry<V>,
    /// Rest of the chain
    next: Option<Box<Node<V>>>,
}

/// The entries of one bucket, in insertion order
#[derive(Debug)]
pub(crate) struct Chain<V> {
    /// First node, `None` for an empty bucket
    head: Option<Box<Node<V>>>,
}

impl<V> Chain<V> {
    /// Creates an empty chain
    pub(crate) const fn new() -> Self {
        Self { head: None }
    }

    /// Returns true if the chain holds no entries
    pub(crate) const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the entry for `key`
    pub(crate) fn find(&self, key: &str) -> Option<&Entry<V>> {
        self.iter().find(|entry| entry.key == key)
    }

    /// Returns the entry for `key` mutably
    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.entry.key == key {
                return Some(&mut node.entry);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Appends `entry` after the last node
    pub(crate) fn push_back(&mut self, entry: Entry<V>) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { entry, next: None }));
    }

    /// Unlinks and returns the first entry
    pub(crate) fn pop_front(&mut self) -> Option<Entry<V>> {
        self.head.take().map(|node| {
            let Node { entry, next } = *node;
            self.head = next;
            entry
        })
    }

    /// Unlinks the node holding `key` and returns its entry
    pub(crate) fn remove(&mut self, key: &str) -> Option<Entry<V>> {
        let mut cursor = &mut self.head;
        loop {
            match cursor {
                None => return None,
                Some(node) if node.entry.key == key => {
                    let next = node.next.take();
                    let removed = cursor.take();
                    *cursor = next;
                    return removed.map(|node| node.entry);
                }
                Some(node) => cursor = &mut node.next,
            }
        }
    }

    /// Iterates the entries from head to tail
    pub(crate) fn iter(&self) -> ChainIter<'_, V> {
        ChainIter { next: self.head.as_deref() }
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // unlink iteratively so long chains cannot overflow the stack
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

/// `key: value -> key: value`, or `-` for an empty chain
impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (position, entry) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Borrowing iterator over a [`Chain`]
#[derive(Debug, Clone)]
pub(crate) struct ChainIter<'a, V> {
    /// Node to yield next
    next: Option<&'a Node<V>>,
}

impl<V> ChainIter<'_, V> {
    /// An iterator that yields nothing
    pub(crate) const fn empty() -> Self {
        Self { next: None }
    }
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.entry
        })
    }
}
