use std::path::Path;

use git2::{BranchType, ObjectType, Oid, Repository};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::Branch;

/// Owned session onto one bare repository.
///
/// Opened at the start of a request and dropped on every exit path; sessions
/// and the walk cursors derived from them are never shared between requests.
pub struct RepoSession {
    repo: Repository,
    name: String,
}

/// Branch tip and resolved target commit for one request.
#[derive(Debug, Clone, Copy)]
pub struct Resolved {
    pub tip: Oid,
    pub target: Oid,
}

impl RepoSession {
    /// Open the bare repository at `root/name`.
    ///
    /// The name arrives as a single URL segment; anything that could escape
    /// the storage root is treated as an unknown repository.
    pub fn open(root: &Path, name: &str) -> Result<Self> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(AppError::RepoNotFound(name.to_string()));
        }
        let repo = Repository::open_bare(root.join(name))
            .map_err(|_| AppError::RepoNotFound(name.to_string()))?;
        Ok(Self {
            repo,
            name: name.to_string(),
        })
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every local branch with its tip commit id, in backend iteration order.
    pub fn branches(&self) -> Result<Vec<Branch>> {
        let mut out = Vec::new();
        for item in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = item?;
            let Some(name) = branch.name()?.map(str::to_string) else {
                continue;
            };
            let tip = branch.get().peel_to_commit()?.id();
            out.push(Branch { name, tip });
        }
        Ok(out)
    }

    /// Look up the branch tip and resolve the requested commit spec.
    ///
    /// The spec goes through the generic revision parser, so full ids,
    /// abbreviated ids, and symbolic names all work. An empty or unresolvable
    /// spec falls back to the branch tip; that is a navigation default, not
    /// an error.
    pub fn resolve(&self, branch_name: &str, spec: &str) -> Result<Resolved> {
        let branch = self
            .repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|_| AppError::BranchNotFound(branch_name.to_string()))?;
        let tip = branch.get().peel_to_commit()?.id();

        let target = if spec.is_empty() {
            tip
        } else {
            match self
                .repo
                .revparse_single(spec)
                .and_then(|obj| obj.peel(ObjectType::Commit))
            {
                Ok(obj) => obj.id(),
                Err(e) => {
                    debug!(
                        repo = %self.name,
                        spec,
                        "revision did not resolve, falling back to branch tip: {e}"
                    );
                    tip
                }
            }
        };

        Ok(Resolved { tip, target })
    }
}
