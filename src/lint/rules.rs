use std::path::Path;

use super::predicates::{self, Outcome};
use super::types::{CheckId, CheckResult, Severity, Verdict};

/// A check paired with its severity class
#[derive(Clone, Copy)]
pub struct Rule {
    pub check: CheckId,
    pub severity: Severity,
    pub run: fn(&Path) -> Outcome,
}

impl Rule {
    pub fn apply(&self, package: &Path) -> CheckResult {
        match (self.run)(package) {
            Ok(()) => CheckResult {
                check: self.check,
                severity: self.severity,
                passed: true,
                message: None,
            },
            Err(message) => CheckResult {
                check: self.check,
                severity: self.severity,
                passed: false,
                message: Some(message),
            },
        }
    }
}

/// Every check run against a package. Advisory checks come first.
pub const RULES: &[Rule] = &[
    Rule {
        check: CheckId::NoHiddenFiles,
        severity: Severity::Advisory,
        run: predicates::no_hidden_files,
    },
    Rule {
        check: CheckId::NoZeroByteFiles,
        severity: Severity::Advisory,
        run: predicates::no_zero_byte_files,
    },
    Rule {
        check: CheckId::MetadataHasFiles,
        severity: Severity::Advisory,
        run: predicates::metadata_has_files,
    },
    Rule {
        check: CheckId::ValidName,
        severity: Severity::Blocking,
        run: predicates::valid_name,
    },
    Rule {
        check: CheckId::TwoSubfolders,
        severity: Severity::Blocking,
        run: predicates::two_subfolders,
    },
    Rule {
        check: CheckId::SubfolderNames,
        severity: Severity::Blocking,
        run: predicates::correct_subfolder_names,
    },
    Rule {
        check: CheckId::MetadataIsFlat,
        severity: Severity::Blocking,
        run: predicates::metadata_is_flat,
    },
    Rule {
        check: CheckId::MetadataNaming,
        severity: Severity::Blocking,
        run: predicates::metadata_naming_convention,
    },
    Rule {
        check: CheckId::ObjectsStructure,
        severity: Severity::Blocking,
        run: predicates::objects_structure,
    },
    Rule {
        check: CheckId::NoEmptyFolders,
        severity: Severity::Blocking,
        run: predicates::no_empty_folders,
    },
];

pub fn severity_of(check: CheckId) -> Option<Severity> {
    RULES
        .iter()
        .find(|rule| rule.check == check)
        .map(|rule| rule.severity)
}

/// Fold check results into a verdict. A blocking failure always wins.
pub fn aggregate(results: &[CheckResult]) -> Verdict {
    results
        .iter()
        .filter(|result| !result.passed)
        .map(|result| match result.severity {
            Severity::Advisory => Verdict::NeedsReview,
            Severity::Blocking => Verdict::Invalid,
        })
        .max()
        .unwrap_or(Verdict::Valid)
}
