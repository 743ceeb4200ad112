use std::sync::Arc;

use permutable_core::FieldValue;

/// Field choices accumulated while descending through the field list.
///
/// Snapshots are persistent: [`PartialAssignment::extend`] returns a new
/// assignment sharing its tail with `self`, which is never modified.
#[derive(Debug, Clone, Default)]
pub struct PartialAssignment {
    head: Option<Arc<Node>>,
    len: usize,
}

#[derive(Debug)]
struct Node {
    field: usize,
    value: FieldValue,
    parent: Option<Arc<Node>>,
}

impl PartialAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Snapshot with `(field, value)` appended.
    pub fn extend(&self, field: usize, value: FieldValue) -> Self {
        Self {
            head: Some(Arc::new(Node {
                field,
                value,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Entries in the order they were appended.
    pub fn entries(&self) -> Vec<(usize, &FieldValue)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            entries.push((node.field, &node.value));
            cursor = node.parent.as_deref();
        }
        entries.reverse();
        entries
    }
}
