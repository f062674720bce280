use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a path.
///
/// Falls back to the path unchanged when a variable is undefined.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_undefined_variable_when_expanding_then_path_unchanged() {
        let path = Path::new("$BCMTREE_SURELY_UNDEFINED_VAR/clip.json");
        assert_eq!(expand_path(path), path.to_path_buf());
    }

    #[test]
    fn given_plain_path_when_expanding_then_unchanged() {
        assert_eq!(expand_path(Path::new("/tmp/clip.json")), PathBuf::from("/tmp/clip.json"));
    }
}
