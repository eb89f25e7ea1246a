use snafu::Snafu;

/// Code reported for a move of a folder into its own subtree.
pub const ECYCLE: i32 = -1;

const ENOENT: i32 = 2;
const EEXIST: i32 = 17;
const EBUSY: i32 = 16;
const EINVAL: i32 = 22;
const ENOTEMPTY: i32 = 39;

/// Failure of a single tree operation. The tree is left unchanged whenever
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TreeError {
    #[snafu(display("'{path}' is not a valid folder path"))]
    InvalidArgument { path: String },
    #[snafu(display("Folder '{path}' does not exist"))]
    NotFound { path: String },
    #[snafu(display("Folder '{path}' already exists"))]
    AlreadyExists { path: String },
    #[snafu(display("Folder '{path}' is not empty"))]
    NotEmpty { path: String },
    #[snafu(display("Folder '{path}' is the root and cannot be changed"))]
    Busy { path: String },
    #[snafu(display("Cannot move '{from}' into its own subfolder '{to}'"))]
    Cycle { from: String, to: String },
}

impl TreeError {
    /// Numeric status of the error, using the Linux errno values the folder
    /// tree has always reported, and [`ECYCLE`] for cycles.
    pub fn code(&self) -> i32 {
        match self {
            TreeError::InvalidArgument { .. } => EINVAL,
            TreeError::NotFound { .. } => ENOENT,
            TreeError::AlreadyExists { .. } => EEXIST,
            TreeError::NotEmpty { .. } => ENOTEMPTY,
            TreeError::Busy { .. } => EBUSY,
            TreeError::Cycle { .. } => ECYCLE,
        }
    }
}
