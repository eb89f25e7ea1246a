//! Validation and decomposition of folder paths.
//!
//! A folder path is absolute, `/`-delimited and `/`-terminated, e.g. `/a/bc/`.
//! The root folder is the single `/`. Everything here is a pure string
//! function; nothing consults the tree.

mod path;

pub use path::{
    MAX_FOLDER_NAME_LENGTH, MAX_PATH_LENGTH, ROOT, components, is_subpath_or_equal, is_valid,
    is_valid_folder_name, parent_of, split_first,
};
