//! Per-branch open-ancestor tracking for symlink cycle detection.

use std::path::Path;

/// Immutable chain of canonical paths currently being descended into along
/// one root-to-node traversal branch.
///
/// Each descent extends the chain by reference on the caller's stack frame
/// and the link is discarded when that subtree's traversal returns, so
/// concurrent sibling branches never observe each other's ancestors. A
/// process-global visited-set would make one branch's in-progress
/// directories look like cycles to its siblings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AncestorChain<'a> {
    path: &'a Path,
    parent: Option<&'a AncestorChain<'a>>,
}

impl<'a> AncestorChain<'a> {
    /// Start a chain at the scan root.
    pub fn root(path: &'a Path) -> Self {
        Self { path, parent: None }
    }

    /// Extend the chain with one more open directory.
    pub fn push(&'a self, path: &'a Path) -> AncestorChain<'a> {
        Self {
            path,
            parent: Some(self),
        }
    }

    /// Check whether a canonical path is already open on this branch.
    pub fn contains(&self, candidate: &Path) -> bool {
        let mut link = Some(self);
        while let Some(chain) = link {
            if chain.path == candidate {
                return true;
            }
            link = chain.parent;
        }
        false
    }

    /// Depth of this chain (number of open directories).
    #[cfg(test)]
    pub fn len(&self) -> usize {
        let mut n = 0;
        let mut link = Some(self);
        while let Some(chain) = link {
            n += 1;
            link = chain.parent;
        }
        n
    }
}
