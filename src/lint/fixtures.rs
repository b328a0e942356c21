use std::fs;
use std::path::{Path, PathBuf};

use crate::layout::SIDECAR_FILES;

pub fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A package that passes every check, named `ACQ_1234_123456`
pub fn good_package(root: &Path) -> PathBuf {
    named_package(root, "ACQ_1234_123456")
}

pub fn named_package(root: &Path, name: &str) -> PathBuf {
    let pkg = root.join(name);

    for file in SIDECAR_FILES {
        write_file(&pkg.join("objects").join(file), b"some bytes for file");
    }
    write_file(&pkg.join("objects/data/file_1.txt"), b"some bytes for file");
    write_file(
        &pkg.join("objects/data/folder1/fileinfolder.txt"),
        b"some bytes for file",
    );
    write_file(&pkg.join("metadata/rclone.log"), b"some bytes for metadata");

    pkg
}
