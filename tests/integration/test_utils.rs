//! Shared fixtures

use std::fs;
use std::path::Path;

/// Populate `root` with a small tree:
///
/// ```text
/// a.txt        "a"
/// empty        ""
/// docs/
/// docs/b.md    "bb"
/// ```
pub fn sample_tree(root: &Path) {
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("empty"), "").unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs").join("b.md"), "bb").unwrap();
}
