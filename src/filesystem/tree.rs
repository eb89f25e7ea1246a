use std::sync::Arc;

use parking_lot::{Mutex, RwLockWriteGuard};
use snafu::{OptionExt, ensure};
use tracing::{debug, trace};

use crate::fatal::fatal;
use crate::filesystem::error::{
    AlreadyExistsSnafu, BusySnafu, CycleSnafu, InvalidArgumentSnafu, NotEmptySnafu, NotFoundSnafu,
};
use crate::filesystem::node::{Node, NodeState};
use crate::filesystem::{ChildTable, TreeError};
use crate::paths::{self, ROOT};

/// A concurrent folder hierarchy.
///
/// Every folder carries its own readers-writer lock over its child table.
/// Lookups walk from the root holding one folder's lock at a time, so
/// operations in unrelated subtrees never wait on each other. Moves, which
/// touch two parents at once, are additionally serialized by a tree-wide
/// mutex that nothing else takes.
///
/// ```
/// use foldertree::Tree;
///
/// let tree = Tree::new();
/// tree.create("/a/").unwrap();
/// tree.create("/a/b/").unwrap();
/// tree.move_folder("/a/b/", "/c/").unwrap();
///
/// assert_eq!(tree.list("/").as_deref(), Some("a,c"));
/// ```
#[derive(Debug, Default)]
pub struct Tree {
    root: Arc<Node>,
    move_lock: Mutex<()>,
}

/// A resolved parent folder together with the path it was found at and the
/// name of the child an operation is about.
struct ParentRef<'p> {
    node: Arc<Node>,
    path: &'p str,
    name: &'p str,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists the folder at `path`: its children's names in lexicographic
    /// order, comma separated. An empty folder lists as an empty string.
    ///
    /// Returns `None` when `path` is invalid or does not exist.
    pub fn list(&self, path: &str) -> Option<String> {
        let node = self.resolve(path).ok()?;

        let mut names = {
            let state = node.read();
            if state.detached {
                return None;
            }
            state.children.names().map(str::to_owned).collect::<Vec<_>>()
        };

        names.sort_unstable();
        Some(names.join(","))
    }

    /// Creates an empty folder at `path`. Its parent must already exist.
    pub fn create(&self, path: &str) -> Result<(), TreeError> {
        ensure!(paths::is_valid(path), InvalidArgumentSnafu { path });

        let parent = match self.resolve_parent(path) {
            Err(TreeError::Busy { .. }) => return AlreadyExistsSnafu { path }.fail(),
            other => other?,
        };

        let mut state = parent.node.write();
        ensure!(!state.detached, NotFoundSnafu { path: parent.path });
        state
            .children
            .insert(parent.name, Arc::new(Node::new()))
            .ok()
            .context(AlreadyExistsSnafu { path })?;

        debug!("Created folder '{path}'");
        Ok(())
    }

    /// Removes the empty folder at `path`.
    pub fn remove(&self, path: &str) -> Result<(), TreeError> {
        ensure!(path != ROOT, BusySnafu { path });
        ensure!(paths::is_valid(path), InvalidArgumentSnafu { path });

        let parent = self.resolve_parent(path)?;
        let mut parent_state = parent.node.write();
        ensure!(!parent_state.detached, NotFoundSnafu { path: parent.path });

        let child = parent_state
            .children
            .get(parent.name)
            .cloned()
            .context(NotFoundSnafu { path })?;

        // Decided under the child's own lock so a racing create below it
        // either lands first or sees the child as detached.
        {
            let mut child_state = child.write();
            ensure!(child_state.children.is_empty(), NotEmptySnafu { path });
            child_state.detached = true;
        }

        parent_state.children.remove(parent.name);
        debug!("Removed folder '{path}'");
        Ok(())
    }

    /// Moves the folder at `source`, with its whole subtree, to `target`.
    ///
    /// `target` must not exist yet, while its parent must. Moving a folder
    /// onto itself is a no-op.
    pub fn move_folder(&self, source: &str, target: &str) -> Result<(), TreeError> {
        ensure!(paths::is_valid(source), InvalidArgumentSnafu { path: source });
        ensure!(paths::is_valid(target), InvalidArgumentSnafu { path: target });
        ensure!(source != ROOT, BusySnafu { path: source });
        ensure!(target != ROOT, AlreadyExistsSnafu { path: target });
        if source == target {
            return Ok(());
        }
        ensure!(
            !paths::is_subpath_or_equal(source, target),
            CycleSnafu {
                from: source,
                to: target
            }
        );

        let _move_guard = self.move_lock.lock();

        // Resolved inside the critical section: only moves relocate folders,
        // so these stay the folders at these paths until the guard drops.
        let source_parent = self.resolve_parent(source)?;
        let target_parent = self.resolve_parent(target)?;

        if Arc::ptr_eq(&source_parent.node, &target_parent.node) {
            let mut state = source_parent.node.write();
            ensure!(!state.detached, NotFoundSnafu { path: source_parent.path });
            Self::relink(
                &mut state.children,
                None,
                (source, source_parent.name),
                (target, target_parent.name),
            )?;
        } else {
            let (mut source_state, mut target_state) =
                Self::write_pair(&source_parent, &target_parent);
            ensure!(
                !source_state.detached,
                NotFoundSnafu { path: source_parent.path }
            );
            ensure!(
                !target_state.detached,
                NotFoundSnafu { path: target_parent.path }
            );
            Self::relink(
                &mut source_state.children,
                Some(&mut target_state.children),
                (source, source_parent.name),
                (target, target_parent.name),
            )?;
        }

        debug!("Moved folder '{source}' to '{target}'");
        Ok(())
    }

    /// Transfers a subtree between two locked child tables, or renames it
    /// within one table when `target_children` is `None`. Each endpoint is
    /// given as its full path and its name within the parent.
    fn relink<'a>(
        source_children: &'a mut ChildTable<Arc<Node>>,
        target_children: Option<&'a mut ChildTable<Arc<Node>>>,
        (source, source_name): (&str, &str),
        (target, target_name): (&str, &str),
    ) -> Result<(), TreeError> {
        ensure!(
            source_children.contains(source_name),
            NotFoundSnafu { path: source }
        );
        let occupied = match target_children.as_deref() {
            Some(children) => children.contains(target_name),
            None => source_children.contains(target_name),
        };
        ensure!(!occupied, AlreadyExistsSnafu { path: target });

        let Some(subtree) = source_children.remove(source_name) else {
            fatal(format!("'{source}' vanished under a write-locked parent"));
        };
        if target_children
            .unwrap_or(source_children)
            .insert(target_name, subtree)
            .is_err()
        {
            fatal(format!("'{target}' appeared under a write-locked parent"));
        }

        Ok(())
    }

    /// Write-locks two distinct parents in ascending path order. An ancestor's
    /// path is a prefix of its descendant's, so ancestors are always locked
    /// first, matching the parent-then-child order used by `remove`.
    fn write_pair<'a>(
        source: &'a ParentRef<'_>,
        target: &'a ParentRef<'_>,
    ) -> (
        RwLockWriteGuard<'a, NodeState>,
        RwLockWriteGuard<'a, NodeState>,
    ) {
        if source.path <= target.path {
            let source_state = source.node.write();
            let target_state = target.node.write();
            (source_state, target_state)
        } else {
            let target_state = target.node.write();
            let source_state = source.node.write();
            (source_state, target_state)
        }
    }

    /// Finds the folder at `path`, holding one folder's read lock at a time.
    fn resolve(&self, path: &str) -> Result<Arc<Node>, TreeError> {
        ensure!(paths::is_valid(path), InvalidArgumentSnafu { path });

        let mut current = Arc::clone(&self.root);
        let mut rest = path;

        while let Some((name, remaining)) = paths::split_first(rest) {
            trace!("Resolving '{name}' on the way to '{path}'");
            let next = current.read().children.get(name).cloned();
            current = next.context(NotFoundSnafu { path })?;
            rest = remaining;
        }

        Ok(current)
    }

    /// Finds the parent folder of `path`. Fails with `Busy` for the root,
    /// which has no parent.
    fn resolve_parent<'p>(&self, path: &'p str) -> Result<ParentRef<'p>, TreeError> {
        let (parent_path, name) = paths::parent_of(path).context(BusySnafu { path })?;
        let node = self.resolve(parent_path)?;

        Ok(ParentRef {
            node,
            path: parent_path,
            name,
        })
    }
}
