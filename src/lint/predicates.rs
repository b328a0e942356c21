use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::layout::{
    is_allowed_metadata_name, is_hidden_name, is_valid_package_id, DATA_DIR, METADATA_DIR,
    OBJECTS_DIR, SIDECAR_FILES,
};

/// `Err` carries the diagnostic message for a failed check
pub type Outcome = Result<(), String>;

pub fn package_name(package: &Path) -> String {
    package
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| package.display().to_string())
}

/// Top level folder name has to conform to ACQ_####_######
pub fn valid_name(package: &Path) -> Outcome {
    let name = package_name(package);
    if is_valid_package_id(&name) {
        Ok(())
    } else {
        Err(format!("{name} does not conform to ACQ_####_######"))
    }
}

/// There must be exactly two subfolders in the package
pub fn two_subfolders(package: &Path) -> Outcome {
    let folders = subfolder_names(package)?;
    if folders.len() == 2 {
        Ok(())
    } else {
        Err(format!(
            "{} does not have exactly two subfolders, found {}: {}",
            package_name(package),
            folders.len(),
            format_list(&folders)
        ))
    }
}

/// Names of the directories directly inside `package`, sorted
pub fn subfolder_names(package: &Path) -> Result<Vec<String>, String> {
    let entries = fs::read_dir(package).map_err(|e| unreadable(package, &e))?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| unreadable(package, &e))?;
        let file_type = entry.file_type().map_err(|e| unreadable(&entry.path(), &e))?;
        if file_type.is_dir() {
            folders.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    folders.sort();
    Ok(folders)
}

/// Second level folders must be objects and metadata
pub fn correct_subfolder_names(package: &Path) -> Outcome {
    let expected: BTreeSet<&str> = [OBJECTS_DIR, METADATA_DIR].into_iter().collect();
    let folders = subfolder_names(package)?;
    let found: BTreeSet<&str> = folders.iter().map(String::as_str).collect();

    if found == expected {
        Ok(())
    } else {
        Err(format!(
            "{} subfolders should be objects and metadata, found {}",
            package_name(package),
            format_list(&folders)
        ))
    }
}

/// The package should not contain hidden or OS junk files
pub fn no_hidden_files(package: &Path) -> Outcome {
    let hidden: Vec<String> = scan(package)?
        .into_iter()
        .filter(|entry| is_hidden_name(&entry.file_name().to_string_lossy()))
        .map(|entry| relative(package, entry.path()))
        .collect();

    if hidden.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} has hidden files {}",
            package_name(package),
            format_list(&hidden)
        ))
    }
}

/// The package should not contain zero byte files
pub fn no_zero_byte_files(package: &Path) -> Outcome {
    let mut empty = Vec::new();
    for entry in scan(package)? {
        if !entry.file_type().is_file() {
            continue;
        }
        let metadata = entry
            .metadata()
            .map_err(|e| format!("unable to stat {}: {}", entry.path().display(), e))?;
        if metadata.len() == 0 {
            empty.push(relative(package, entry.path()));
        }
    }

    if empty.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} has zero bytes file {}",
            package_name(package),
            format_list(&empty)
        ))
    }
}

/// The metadata folder should not have any folder structure
pub fn metadata_is_flat(package: &Path) -> Outcome {
    let metadata = package.join(METADATA_DIR);
    let entries = match fs::read_dir(&metadata) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(format!(
                "{} metadata folder is missing",
                package_name(package)
            ));
        }
        Err(e) => return Err(unreadable(&metadata, &e)),
    };

    let mut nested = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| unreadable(&metadata, &e))?;
        let file_type = entry.file_type().map_err(|e| unreadable(&entry.path(), &e))?;
        if file_type.is_dir() {
            nested.push(relative(package, &entry.path()));
        }
    }
    nested.sort();

    if nested.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} has unexpected directory: {}",
            package_name(package),
            format_list(&nested)
        ))
    }
}

/// The metadata folder should have one or more files
pub fn metadata_has_files(package: &Path) -> Outcome {
    let has_files = scan(&package.join(METADATA_DIR))?
        .iter()
        .any(|entry| entry.file_type().is_file());

    if has_files {
        Ok(())
    } else {
        Err(format!(
            "{} metadata folder does not have any files",
            package_name(package)
        ))
    }
}

/// Every metadata file name should be in the accepted list
pub fn metadata_naming_convention(package: &Path) -> Outcome {
    let nonconforming: Vec<String> = scan(&package.join(METADATA_DIR))?
        .into_iter()
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !is_allowed_metadata_name(&entry.file_name().to_string_lossy()))
        .map(|entry| relative(package, entry.path()))
        .collect();

    if nonconforming.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} has nonconforming metadata file(s): {}",
            package_name(package),
            format_list(&nonconforming)
        ))
    }
}

/// objects holds a data folder plus the four bag sidecar files
pub fn objects_structure(package: &Path) -> Outcome {
    let objects = package.join(OBJECTS_DIR);
    let mut missing = Vec::new();

    if !is_real(&objects.join(DATA_DIR), fs::FileType::is_dir) {
        missing.push(DATA_DIR.to_string());
    }
    for file in SIDECAR_FILES {
        if !is_real(&objects.join(file), fs::FileType::is_file) {
            missing.push(file.to_string());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} has incorrect structure, missing {}",
            package_name(package),
            format_list(&missing)
        ))
    }
}

/// No folder under objects may be empty
pub fn no_empty_folders(package: &Path) -> Outcome {
    let mut empty = Vec::new();
    for entry in scan(&package.join(OBJECTS_DIR))? {
        if !entry.file_type().is_dir() {
            continue;
        }
        let mut children = fs::read_dir(entry.path()).map_err(|e| unreadable(entry.path(), &e))?;
        if children.next().is_none() {
            empty.push(relative(package, entry.path()));
        }
    }

    if empty.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} has empty folder: {}",
            package_name(package),
            format_list(&empty)
        ))
    }
}

/// Recursive listing below `root`, sorted by name. A missing root is empty.
fn scan(root: &Path) -> Result<Vec<walkdir::DirEntry>, String> {
    match fs::symlink_metadata(root) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(unreadable(root, &e)),
    }

    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                format!("unable to scan {}: {}", path.display(), e)
            })
        })
        .collect()
}

/// Type test on the entry itself; a symlink is neither a file nor a directory
fn is_real(path: &Path, test: fn(&fs::FileType) -> bool) -> bool {
    fs::symlink_metadata(path)
        .map(|metadata| test(&metadata.file_type()))
        .unwrap_or(false)
}

fn unreadable(path: &Path, err: &io::Error) -> String {
    format!("unable to read {}: {}", path.display(), err)
}

fn relative(package: &Path, path: &Path) -> String {
    path.strip_prefix(package)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn format_list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}
