use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::filesystem::ChildTable;

/// One folder of the tree.
///
/// The lock covers this folder's own child table and nothing below it.
/// Children are shared through `Arc` only so that an operation can keep
/// walking after it releases the parent's lock; the parent's table remains
/// the single owner that keeps a child reachable.
#[derive(Debug, Default)]
pub(crate) struct Node {
    state: RwLock<NodeState>,
}

#[derive(Debug, Default)]
pub(crate) struct NodeState {
    pub children: ChildTable<Arc<Node>>,
    /// Set under this node's write lock once it is unlinked from its parent.
    /// A detached node never gains children again.
    pub detached: bool,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, NodeState> {
        self.state.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, NodeState> {
        self.state.write()
    }
}

impl Drop for Node {
    // Unlinks descendants with an explicit stack instead of letting each
    // `Arc` drop recurse; repeated moves can nest folders far deeper than any
    // path could address.
    fn drop(&mut self) {
        let mut pending = self.state.get_mut().children.drain().collect::<Vec<_>>();

        while let Some(child) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(child) {
                pending.extend(node.state.get_mut().children.drain());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_deep_chain_does_not_recurse() {
        let root = Node::new();
        let mut current = Arc::new(Node::new());
        root.write().children.insert("a", Arc::clone(&current)).unwrap();

        for _ in 0..100_000 {
            let next = Arc::new(Node::new());
            current.write().children.insert("a", Arc::clone(&next)).unwrap();
            current = next;
        }
        drop(current);

        drop(root);
    }

    #[test]
    fn shared_children_survive_their_parent() {
        let child = Arc::new(Node::new());
        child.write().children.insert("x", Arc::new(Node::new())).unwrap();

        let parent = Node::new();
        parent.write().children.insert("a", Arc::clone(&child)).unwrap();
        drop(parent);

        assert_eq!(child.read().children.len(), 1);
    }
}
