//! Error types for diagram merging.

use std::fmt;

use crate::types::SiteId;

/// Errors that can occur while merging two diagrams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A merge input has no sites.
    EmptySide,

    /// During the chain walk neither current region yielded a forward
    /// crossing of the chain's perpendicular ray. This indicates
    /// non-separable inputs or a numeric breakdown; callers must treat it
    /// as unrecoverable for this input.
    NoCrossing {
        left_site: SiteId,
        right_site: SiteId,
    },

    /// A crossed edge names an owner id that is not a site of its diagram.
    /// The input violates the diagram invariants.
    UnknownSite(SiteId),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::EmptySide => {
                write!(f, "merge error: empty input diagram")
            }
            MergeError::NoCrossing {
                left_site,
                right_site,
            } => {
                write!(
                    f,
                    "merge error: no crossing between regions of sites {} and {}",
                    left_site, right_site
                )
            }
            MergeError::UnknownSite(id) => {
                write!(f, "merge error: edge owner {} is not a site of its diagram", id)
            }
        }
    }
}

impl std::error::Error for MergeError {}
