use std::path::Path;

/// Renders a host path for messages, resolved to an absolute path when the
/// filesystem allows it and as given otherwise.
pub trait PathDisplayExt {
    fn display_best_effort(&self) -> String;
}

impl PathDisplayExt for Path {
    fn display_best_effort(&self) -> String {
        match self.canonicalize() {
            Ok(canonical) => canonical.display().to_string(),
            Err(_) => self.display().to_string(),
        }
    }
}
