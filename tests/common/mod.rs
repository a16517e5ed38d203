#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use arbor::Tree;

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Compare a tree's printed form with `tests/snapshots/<name>`.
///
/// With `ARBOR_UPDATE_SNAPSHOTS` set the golden file is rewritten instead.
/// A mismatch reports the first differing line by number.
pub fn assert_tree_snapshot<T: std::fmt::Display>(name: &str, tree: &Tree<T>) {
    let printed = render(tree);
    let path = snapshot_root().join(name);

    if std::env::var_os("ARBOR_UPDATE_SNAPSHOTS").is_some() {
        fs::write(&path, &printed).expect("write snapshot");
        return;
    }

    let golden = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("read snapshot {}: {err}", path.display()));
    let golden_lines: Vec<&str> = golden.lines().collect();
    let printed_lines: Vec<&str> = printed.lines().collect();

    if let Some(line) = (0..golden_lines.len().max(printed_lines.len()))
        .find(|&line| golden_lines.get(line) != printed_lines.get(line))
    {
        panic!(
            "{} differs at line {}: expected {:?}, printed {:?} \
             (ARBOR_UPDATE_SNAPSHOTS=1 regenerates it)",
            path.display(),
            line + 1,
            golden_lines.get(line),
            printed_lines.get(line),
        );
    }
}

/// Build a tree, ignoring duplicate rejections
pub fn tree_from<T: Ord>(entries: impl IntoIterator<Item = T>) -> Tree<T> {
    let mut tree = Tree::new();
    for entry in entries {
        tree.insert(entry);
    }
    tree
}

/// Render `write_tree` output to a string
pub fn render<T: std::fmt::Display>(tree: &Tree<T>) -> String {
    let mut out = Vec::new();
    tree.write_tree(&mut out).expect("write to Vec");
    String::from_utf8(out).expect("utf-8 output")
}
