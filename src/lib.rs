//! An in-memory hierarchy of folders that many threads can create, remove,
//! list and move concurrently.
//!
//! ```
//! use foldertree::{Tree, TreeError};
//!
//! let tree = Tree::new();
//! tree.create("/docs/").unwrap();
//! tree.create("/docs/drafts/").unwrap();
//!
//! assert!(matches!(tree.remove("/docs/"), Err(TreeError::NotEmpty { .. })));
//! assert_eq!(tree.list("/docs/").as_deref(), Some("drafts"));
//! ```

pub mod fatal;
pub mod filesystem;
pub mod paths;

pub use filesystem::{ChildTable, ECYCLE, Tree, TreeError};
