/// Max length of a path in bytes
pub const MAX_PATH_LENGTH: usize = 4095;

/// Max length of a single folder name in bytes
pub const MAX_FOLDER_NAME_LENGTH: usize = 255;

pub const ROOT: &str = "/";

const DELIMITER: char = '/';

/// Checks that `name` is 1 to 255 lowercase ASCII letters.
pub fn is_valid_folder_name(name: &str) -> bool {
    (1..=MAX_FOLDER_NAME_LENGTH).contains(&name.len())
        && name.bytes().all(|byte| byte.is_ascii_lowercase())
}

/// Checks whether `path` is a well-formed folder path.
///
/// Valid paths start and end with `/`, are at most [`MAX_PATH_LENGTH`] bytes
/// long and consist of valid folder names separated by single slashes.
pub fn is_valid(path: &str) -> bool {
    if path == ROOT {
        return true;
    }
    if path.len() > MAX_PATH_LENGTH
        || !path.starts_with(DELIMITER)
        || !path.ends_with(DELIMITER)
        || path.len() < 3
    {
        return false;
    }

    path[1..path.len() - 1]
        .split(DELIMITER)
        .all(is_valid_folder_name)
}

/// Splits off the first component of a valid path.
///
/// `/a/b/` yields `("a", "/b/")` and `/a/` yields `("a", "/")`.
/// Returns `None` for the root.
pub fn split_first(path: &str) -> Option<(&str, &str)> {
    let inner = path.strip_prefix(DELIMITER)?;
    let end = inner.find(DELIMITER)?;
    if end == 0 {
        return None;
    }
    Some((&inner[..end], &inner[end..]))
}

/// Splits a valid path into its parent path and its last component.
///
/// `/a/b/` yields `("/a/", "b")`. Returns `None` for the root, which has no
/// parent.
pub fn parent_of(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.strip_suffix(DELIMITER)?;
    let last_delimiter = trimmed.rfind(DELIMITER)?;
    let name = &trimmed[last_delimiter + 1..];
    if name.is_empty() {
        return None;
    }
    Some((&path[..=last_delimiter], name))
}

/// Checks whether `path` is `ancestor` itself or lies somewhere beneath it.
///
/// Both paths must be valid. Since valid paths are slash-terminated, a string
/// prefix is always a whole-component prefix: `/a/` is not an ancestor of
/// `/ab/`.
pub fn is_subpath_or_equal(ancestor: &str, path: &str) -> bool {
    path.starts_with(ancestor)
}

/// Iterates over the folder names of a valid path, root first.
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split(DELIMITER).filter(|component| !component.is_empty())
}
