use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const SIDECAR_FILES: [&str; 4] = [
    "bag-info.txt",
    "bagit.txt",
    "manifest-md5.txt",
    "tagmanifest-md5.txt",
];

pub struct TestWorkspace {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_package-cloud").to_string();

        Self { dir, binary_path }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Package under `<workspace>/<parent>/<name>` that passes every check
    pub fn package(&self, parent: &str, name: &str) -> PathBuf {
        let root = format!("{parent}/{name}");
        for file in SIDECAR_FILES {
            self.write(&format!("{root}/objects/{file}"), b"some bytes for file");
        }
        self.write(&format!("{root}/objects/data/file.txt"), b"some bytes for file");
        self.write(&format!("{root}/metadata/rclone.log"), b"some bytes for metadata");
        self.path().join(root)
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("Failed to run package-cloud")
    }

    pub fn lint_log(&self) -> String {
        let mut log = String::new();
        for entry in fs::read_dir(self.path()).unwrap() {
            let entry = entry.unwrap();
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with("lint_") && name.ends_with(".log") {
                log.push_str(&fs::read_to_string(entry.path()).unwrap());
            }
        }
        log
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
