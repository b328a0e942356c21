//! Fixed names that make up the on-disk package contract.

use regex::Regex;
use std::sync::OnceLock;

/// Top level folder name pattern, `ACQ_####_######`
pub const PACKAGE_ID_PATTERN: &str = r"^ACQ_[0-9]{4}_[0-9]{6}$";

pub const OBJECTS_DIR: &str = "objects";
pub const METADATA_DIR: &str = "metadata";
pub const DATA_DIR: &str = "data";

pub const BAGIT_TXT: &str = "bagit.txt";
pub const BAG_INFO_TXT: &str = "bag-info.txt";
pub const MANIFEST_MD5: &str = "manifest-md5.txt";
pub const TAGMANIFEST_MD5: &str = "tagmanifest-md5.txt";

/// Sidecar files required next to `objects/data`
pub const SIDECAR_FILES: [&str; 4] = [BAG_INFO_TXT, BAGIT_TXT, MANIFEST_MD5, TAGMANIFEST_MD5];

/// File names accepted inside `metadata`
pub const METADATA_ALLOW_LIST: [&str; 1] = ["rclone.log"];

/// Name prefixes treated as hidden or OS junk
pub const HIDDEN_PREFIXES: [&str; 2] = [".", "Thumbs"];

/// Length of the `_######` suffix that separates a package id from its collection
const PACKAGE_SUFFIX_LEN: usize = 7;

fn package_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PACKAGE_ID_PATTERN).expect("package id pattern is valid"))
}

pub fn is_valid_package_id(id: &str) -> bool {
    package_id_regex().is_match(id)
}

/// Collection folder for a package id, e.g. `ACQ_1234` for `ACQ_1234_123456`
pub fn collection_id(id: &str) -> Option<&str> {
    if !is_valid_package_id(id) {
        return None;
    }
    id.get(..id.len() - PACKAGE_SUFFIX_LEN)
}

pub fn is_hidden_name(name: &str) -> bool {
    HIDDEN_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

pub fn is_allowed_metadata_name(name: &str) -> bool {
    METADATA_ALLOW_LIST.contains(&name)
}
