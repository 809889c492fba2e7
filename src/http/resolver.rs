use std::collections::HashSet;
use std::path::Path;

/// Outcome of classifying a requested resource against the filesystem and
/// the deny-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Exists, safe, servable
    Ok,
    /// Resolved path contains a literal ".." segment
    Traversal,
    /// Target is on the configured deny-list
    Forbidden,
    /// Not a regular file under the root
    Missing,
}

/// Maps requested paths to a servable/unservable verdict.
///
/// Holds the externally supplied forbidden set of root-relative targets,
/// checked in addition to traversal detection.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    forbidden: HashSet<String>,
}

impl Resolver {
    pub fn new(forbidden: HashSet<String>) -> Self {
        Self { forbidden }
    }

    /// Classifies one resource. Existence is checked first, so a missing
    /// path short-circuits to `Missing` before any safety check; traversal
    /// is checked before forbidden-set membership.
    ///
    /// Traversal detection is a coarse substring containment test on the
    /// resolved path, not canonicalization; encoded traversal is not
    /// caught.
    pub async fn classify(&self, target: &str, resource: &Path) -> Resolution {
        match tokio::fs::metadata(resource).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Resolution::Missing,
        }

        if resource.to_string_lossy().contains("..") {
            return Resolution::Traversal;
        }

        if self.forbidden.contains(target) {
            return Resolution::Forbidden;
        }

        Resolution::Ok
    }
}
