use git2::{Oid, Repository, Revwalk};

use crate::models::LogEntry;

/// Lazy ancestry walk from a branch tip, in libgit2's default
/// descendant-to-ancestor order. The backend's order is authoritative; no
/// sorting flags are applied on top of it.
///
/// The walk marks the entry whose id equals the target and remembers the
/// commit visited immediately after it as the diff baseline. That baseline
/// is exact for linear history only: at a merge commit it is whichever
/// predecessor the walk happens to visit next, not a chosen parent. This
/// approximation is intentional and kept as-is. When the target is not
/// reachable from the tip, no entry is marked and the baseline stays unset,
/// which downstream renders as a diff against no prior state.
pub struct HistoryWalk<'repo> {
    repo: &'repo Repository,
    walk: Revwalk<'repo>,
    target: Oid,
    base_pending: bool,
    diff_base: Option<Oid>,
}

impl<'repo> HistoryWalk<'repo> {
    pub fn new(repo: &'repo Repository, tip: Oid, target: Oid) -> Result<Self, git2::Error> {
        let mut walk = repo.revwalk()?;
        walk.push(tip)?;
        Ok(Self {
            repo,
            walk,
            target,
            base_pending: false,
            diff_base: None,
        })
    }

    /// The next-older commit after the target, available once iteration has
    /// passed it. `None` before that point, at the end of history, and when
    /// the target never appeared.
    pub fn diff_base(&self) -> Option<Oid> {
        self.diff_base
    }
}

impl Iterator for HistoryWalk<'_> {
    type Item = Result<LogEntry, git2::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = match self.walk.next()? {
            Ok(id) => id,
            Err(e) => return Some(Err(e)),
        };
        if self.base_pending {
            self.diff_base = Some(id);
            self.base_pending = false;
        }
        let is_target = id == self.target;
        if is_target {
            self.base_pending = true;
        }
        let summary = match self.repo.find_commit(id) {
            Ok(commit) => commit.summary().unwrap_or("").to_string(),
            Err(e) => return Some(Err(e)),
        };
        Some(Ok(LogEntry {
            id,
            summary,
            is_target,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn commit_file(
        repo: &Repository,
        parent: Option<Oid>,
        name: &str,
        content: &[u8],
        message: &str,
    ) -> Oid {
        let blob = repo.blob(content).unwrap();
        let mut builder = repo.treebuilder(None).unwrap();
        builder.insert(name, blob, 0o100644).unwrap();
        let tree = repo.find_tree(builder.write().unwrap()).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let parents: Vec<git2::Commit> = parent
            .map(|p| repo.find_commit(p).unwrap())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("refs/heads/main"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn linear_repo() -> (TempDir, Repository, [Oid; 3]) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init_bare(dir.path().join("demo.git")).unwrap();
        let c0 = commit_file(&repo, None, "a.txt", b"one\n", "first");
        let c1 = commit_file(&repo, Some(c0), "a.txt", b"two\n", "second");
        let c2 = commit_file(&repo, Some(c1), "a.txt", b"three\n", "third");
        let repo = Repository::open_bare(dir.path().join("demo.git")).unwrap();
        (dir, repo, [c0, c1, c2])
    }

    fn collect(walk: &mut HistoryWalk) -> Vec<LogEntry> {
        walk.by_ref().map(|e| e.unwrap()).collect()
    }

    #[test]
    fn walks_tip_to_root_and_marks_target() {
        let (_dir, repo, [c0, c1, c2]) = linear_repo();
        let mut walk = HistoryWalk::new(&repo, c2, c1).unwrap();
        let entries = collect(&mut walk);
        assert_eq!(
            entries.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![c2, c1, c0]
        );
        assert_eq!(
            entries.iter().map(|e| e.is_target).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(entries[1].summary, "second");
    }

    #[test]
    fn diff_base_is_next_older_commit() {
        let (_dir, repo, [c0, c1, c2]) = linear_repo();
        let mut walk = HistoryWalk::new(&repo, c2, c1).unwrap();
        collect(&mut walk);
        assert_eq!(walk.diff_base(), Some(c0));

        let mut walk = HistoryWalk::new(&repo, c2, c2).unwrap();
        collect(&mut walk);
        assert_eq!(walk.diff_base(), Some(c1));
    }

    #[test]
    fn root_commit_has_no_diff_base() {
        let (_dir, repo, [c0, _, c2]) = linear_repo();
        let mut walk = HistoryWalk::new(&repo, c2, c0).unwrap();
        collect(&mut walk);
        assert_eq!(walk.diff_base(), None);
    }

    #[test]
    fn unreachable_target_still_yields_full_log() {
        let (_dir, repo, [_, _, c2]) = linear_repo();
        let mut walk = HistoryWalk::new(&repo, c2, Oid::zero()).unwrap();
        let entries = collect(&mut walk);
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| !e.is_target));
        assert_eq!(walk.diff_base(), None);
    }

    #[test]
    fn never_yields_a_commit_twice() {
        let (_dir, repo, [_, _, c2]) = linear_repo();
        let mut walk = HistoryWalk::new(&repo, c2, c2).unwrap();
        let entries = collect(&mut walk);
        let unique: HashSet<Oid> = entries.iter().map(|e| e.id).collect();
        assert_eq!(unique.len(), entries.len());
    }

    #[test]
    fn walk_is_restartable() {
        let (_dir, repo, [_, c1, c2]) = linear_repo();
        let mut first = HistoryWalk::new(&repo, c2, c1).unwrap();
        let a = collect(&mut first);
        let mut second = HistoryWalk::new(&repo, c2, c1).unwrap();
        let b = collect(&mut second);
        assert_eq!(a.iter().map(|e| e.id).collect::<Vec<_>>(),
                   b.iter().map(|e| e.id).collect::<Vec<_>>());
        assert_eq!(first.diff_base(), second.diff_base());
    }
}
