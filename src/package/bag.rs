use anyhow::{Context, Result};
use chrono::Local;
use md5::{Digest, Md5};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::layout::{BAGIT_TXT, BAG_INFO_TXT, DATA_DIR, MANIFEST_MD5, OBJECTS_DIR, TAGMANIFEST_MD5};

const BAGIT_VERSION: &str = "0.97";

/// One payload line of an md5 manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub md5: String,
    /// Path relative to the payload root, `/` separated
    pub path: String,
}

/// Parse `md5sum`-style lines (`<hash>  <path>`, optionally `<hash> *<path>`)
pub fn parse_md5_manifest(content: &str) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        let (hash, rest) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| anyhow::anyhow!("Malformed md5 line {}: {}", index + 1, line))?;
        let path = rest.trim_start();
        let path = path.strip_prefix('*').unwrap_or(path);

        if hash.len() != 32 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Malformed md5 line {}: invalid hash '{}'", index + 1, hash);
        }
        if path.is_empty() {
            anyhow::bail!("Malformed md5 line {}: missing path", index + 1);
        }

        entries.push(ManifestEntry {
            md5: hash.to_ascii_lowercase(),
            path: path.replace('\\', "/"),
        });
    }

    Ok(entries)
}

/// Write the BagIt sidecar files next to `objects/data`, reusing the
/// transfer's md5 manifest for the payload.
pub fn create_bag_in_objects(md5_manifest: &Path, base: &Path) -> Result<()> {
    let objects = base.join(OBJECTS_DIR);
    let data = objects.join(DATA_DIR);
    if !data.is_dir() {
        anyhow::bail!("{} does not exist. Move the payload first.", data.display());
    }

    let content = fs::read_to_string(md5_manifest)
        .with_context(|| format!("Failed to read md5 manifest: {}", md5_manifest.display()))?;
    let entries = parse_md5_manifest(&content)
        .with_context(|| format!("Failed to parse md5 manifest: {}", md5_manifest.display()))?;

    let manifest: String = entries
        .iter()
        .map(|entry| format!("{}  {}/{}\n", entry.md5, DATA_DIR, entry.path))
        .collect();
    write_tag_file(&objects, MANIFEST_MD5, &manifest)?;

    write_tag_file(
        &objects,
        BAGIT_TXT,
        &format!("BagIt-Version: {BAGIT_VERSION}\nTag-File-Character-Encoding: UTF-8\n"),
    )?;

    let (bytes, count) = payload_oxum(&data)?;
    let bag_info = format!(
        "Bag-Software-Agent: {} v{}\nBagging-Date: {}\nPayload-Oxum: {}.{}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        Local::now().format("%Y-%m-%d"),
        bytes,
        count
    );
    write_tag_file(&objects, BAG_INFO_TXT, &bag_info)?;

    let mut tagmanifest = String::new();
    for name in [BAG_INFO_TXT, BAGIT_TXT, MANIFEST_MD5] {
        let path = objects.join(name);
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        tagmanifest.push_str(&format!("{:x}  {}\n", Md5::digest(&bytes), name));
    }
    write_tag_file(&objects, TAGMANIFEST_MD5, &tagmanifest)?;

    check_completeness(&objects)?;
    debug!("Wrote bag files in {}", objects.display());
    Ok(())
}

/// Every payload file is listed in the manifest and every listed file exists.
/// Checksums are not recomputed.
pub fn check_completeness(objects: &Path) -> Result<()> {
    let manifest_path = objects.join(MANIFEST_MD5);
    let content = fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let listed: BTreeSet<String> = parse_md5_manifest(&content)?
        .into_iter()
        .map(|entry| entry.path)
        .collect();

    let mut on_disk = BTreeSet::new();
    let data = objects.join(DATA_DIR);
    for entry in WalkDir::new(&data).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to walk {}", data.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let rel = entry.path().strip_prefix(objects)?;
        on_disk.insert(rel.to_string_lossy().replace('\\', "/"));
    }

    let unlisted: Vec<&String> = on_disk.difference(&listed).collect();
    let missing: Vec<&String> = listed.difference(&on_disk).collect();

    if !unlisted.is_empty() || !missing.is_empty() {
        anyhow::bail!(
            "Bag in {} is incomplete: not in manifest {:?}, missing from payload {:?}",
            objects.display(),
            unlisted,
            missing
        );
    }
    Ok(())
}

fn payload_oxum(data: &Path) -> Result<(u64, usize)> {
    let mut bytes = 0;
    let mut count = 0;
    for entry in WalkDir::new(data).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to walk {}", data.display()))?;
        if entry.file_type().is_file() {
            bytes += entry
                .metadata()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?
                .len();
            count += 1;
        }
    }
    Ok((bytes, count))
}

fn write_tag_file(objects: &Path, name: &str, content: &str) -> Result<()> {
    let path = objects.join(name);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}
