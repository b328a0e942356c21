//! Turn a loose transfer into the canonical package layout:
//! `<dest>/ACQ_####/ACQ_####_######/{metadata,objects}`.

pub mod bag;

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::layout::{collection_id, DATA_DIR, METADATA_ALLOW_LIST, METADATA_DIR, OBJECTS_DIR};

pub use bag::{check_completeness, create_bag_in_objects};

/// Inputs for building one package
#[derive(Debug, Clone)]
pub struct PackageRequest {
    /// Folder holding the transferred payload
    pub payload: PathBuf,
    /// rclone md5sum output for the payload
    pub md5: PathBuf,
    /// rclone transfer log
    pub log: PathBuf,
    /// Destination root, the collection folder is created inside it
    pub dest: PathBuf,
    pub id: String,
}

/// Check a package id and return its collection id
pub fn validate_package_id(id: &str) -> Result<&str> {
    collection_id(id).ok_or_else(|| anyhow::anyhow!("{} does not match ACQ_####_######", id))
}

/// Build a complete package and return its root
pub fn build_package(request: &PackageRequest) -> Result<PathBuf> {
    let base = create_base_dir(&request.dest, &request.id)?;
    move_metadata_file(&request.log, &base)?;
    move_payload(&request.payload, &base)?;
    create_bag_in_objects(&request.md5, &base)?;
    info!("Created package {}", base.display());
    Ok(base)
}

/// Create `<dest>/<collection>/<id>`, reusing an existing collection folder
pub fn create_base_dir(dest: &Path, id: &str) -> Result<PathBuf> {
    let collection = validate_package_id(id)?;

    let dest_metadata = fs::metadata(dest)
        .with_context(|| format!("{} does not exist", dest.display()))?;
    if dest_metadata.permissions().readonly() {
        anyhow::bail!("{} is not writable", dest.display());
    }

    let base = dest.join(collection).join(id);
    if base.exists() {
        anyhow::bail!(
            "{} already exists. Make sure you are using the correct ID",
            base.display()
        );
    }

    match fs::create_dir_all(&base) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            anyhow::bail!("{} is not writable", dest.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", base.display()));
        }
    }

    debug!("Created package folder {}", base.display());
    Ok(base)
}

/// Move the transfer log into `metadata`, never overwriting
pub fn move_metadata_file(log: &Path, base: &Path) -> Result<PathBuf> {
    let metadata = base.join(METADATA_DIR);
    let target = metadata.join(METADATA_ALLOW_LIST[0]);

    if target.exists() {
        anyhow::bail!("{} already exists. Not moving.", target.display());
    }

    fs::create_dir_all(&metadata)
        .with_context(|| format!("Failed to create {}", metadata.display()))?;
    move_entry(log, &target)?;

    debug!("Moved {} to {}", log.display(), target.display());
    Ok(target)
}

/// Move the payload folder's contents into `objects/data`.
/// The emptied payload folder is left in place.
pub fn move_payload(payload: &Path, base: &Path) -> Result<PathBuf> {
    let data = base.join(OBJECTS_DIR).join(DATA_DIR);

    if data.exists() {
        anyhow::bail!("{} already exists. Not moving files.", data.display());
    }

    let mut entries = fs::read_dir(payload)
        .with_context(|| format!("Failed to read payload {}", payload.display()))?
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read payload {}", payload.display()))?;
    entries.sort_by_key(|entry| entry.file_name());

    fs::create_dir_all(&data).with_context(|| format!("Failed to create {}", data.display()))?;

    for entry in entries {
        move_entry(&entry.path(), &data.join(entry.file_name()))?;
    }

    debug!("Moved payload {} to {}", payload.display(), data.display());
    Ok(data)
}

/// Rename, falling back to copy and delete when the rename fails
/// (for example across filesystems).
fn move_entry(src: &Path, dst: &Path) -> Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    if src.is_dir() {
        copy_dir(src, dst)?;
        fs::remove_dir_all(src).with_context(|| format!("Failed to remove {}", src.display()))?;
    } else {
        fs::copy(src, dst).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dst.display())
        })?;
        fs::remove_file(src).with_context(|| format!("Failed to remove {}", src.display()))?;
    }
    Ok(())
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}
