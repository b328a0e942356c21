use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identity of one structural check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    ValidName,
    TwoSubfolders,
    SubfolderNames,
    NoHiddenFiles,
    NoZeroByteFiles,
    MetadataIsFlat,
    MetadataHasFiles,
    MetadataNaming,
    ObjectsStructure,
    NoEmptyFolders,
}

impl CheckId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::ValidName => "valid_name",
            CheckId::TwoSubfolders => "two_subfolders",
            CheckId::SubfolderNames => "subfolder_names",
            CheckId::NoHiddenFiles => "no_hidden_files",
            CheckId::NoZeroByteFiles => "no_zero_byte_files",
            CheckId::MetadataIsFlat => "metadata_is_flat",
            CheckId::MetadataHasFiles => "metadata_has_files",
            CheckId::MetadataNaming => "metadata_naming",
            CheckId::ObjectsStructure => "objects_structure",
            CheckId::NoEmptyFolders => "no_empty_folders",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity class of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Residual artifacts a human may accept after inspection
    Advisory,
    /// Structural nonconformance, the package must be corrected
    Blocking,
}

/// Three-way package verdict, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    NeedsReview,
    Invalid,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::NeedsReview => "needs_review",
            Verdict::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single check against a single package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: CheckId,
    pub severity: Severity,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A failed check, ready to be routed to a log sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub check: CheckId,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReport {
    pub name: String,
    pub path: PathBuf,
    pub verdict: Verdict,
    pub diagnostics: Vec<Diagnostic>,
}

impl PackageReport {
    pub fn blocking(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Blocking)
    }

    pub fn advisory(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Advisory)
    }
}
