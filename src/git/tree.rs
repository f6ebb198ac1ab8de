use git2::{Commit, ObjectType, Repository, Tree};

use crate::error::{AppError, Result};
use crate::models::{BlobData, EntryKind, FileLookup, TreeItem};

/// Descend from the commit's root tree one path segment at a time.
///
/// Every segment must name a tree entry at its level; a missing name or a
/// blob in the middle of the path is a `PathNotFound`. An empty path yields
/// the root tree unchanged.
pub fn navigate<'r>(repo: &'r Repository, commit: &Commit<'r>, path: &[String]) -> Result<Tree<'r>> {
    let mut tree = commit.tree()?;
    for segment in path {
        let id = {
            let entry = tree
                .get_name(segment)
                .ok_or_else(|| AppError::PathNotFound(path.join("/")))?;
            if entry.kind() != Some(ObjectType::Tree) {
                return Err(AppError::PathNotFound(path.join("/")));
            }
            entry.id()
        };
        tree = repo.find_tree(id)?;
    }
    Ok(tree)
}

/// Entry listing in backend-native order. Entries that are neither trees nor
/// blobs (submodule commits) are skipped.
pub fn list_entries(tree: &Tree) -> Vec<TreeItem> {
    tree.iter()
        .filter_map(|entry| {
            let kind = match entry.kind() {
                Some(ObjectType::Tree) => EntryKind::Tree,
                Some(ObjectType::Blob) => EntryKind::Blob,
                _ => return None,
            };
            Some(TreeItem {
                name: entry.name().unwrap_or("").to_string(),
                kind,
            })
        })
        .collect()
}

/// Look up `name` in the navigated subtree and read its bytes. The outcome
/// distinguishes a missing entry from one of the wrong kind so the content
/// panel can say which happened.
pub fn find_file(repo: &Repository, tree: &Tree, name: &str) -> Result<FileLookup> {
    let Some(entry) = tree.get_name(name) else {
        return Ok(FileLookup::Missing);
    };
    match entry.kind() {
        Some(ObjectType::Blob) => {
            let blob = repo.find_blob(entry.id())?;
            Ok(FileLookup::Found(BlobData {
                bytes: blob.content().to_vec(),
                is_binary: blob.is_binary(),
            }))
        }
        Some(kind) => Ok(FileLookup::WrongKind(kind.to_string())),
        None => Ok(FileLookup::WrongKind("unknown".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Root tree: a.txt, bin.dat, sub/b.txt
    fn repo_with_tree() -> (TempDir, Repository, git2::Oid) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init_bare(dir.path().join("demo.git")).unwrap();

        let a = repo.blob(b"hello\n").unwrap();
        let b = repo.blob(b"nested\n").unwrap();
        let bin = repo.blob(b"\x00\x01\x02binary").unwrap();

        let mut sub = repo.treebuilder(None).unwrap();
        sub.insert("b.txt", b, 0o100644).unwrap();
        let sub_id = sub.write().unwrap();

        let mut root = repo.treebuilder(None).unwrap();
        root.insert("a.txt", a, 0o100644).unwrap();
        root.insert("bin.dat", bin, 0o100644).unwrap();
        root.insert("sub", sub_id, 0o040000).unwrap();
        let root_id = root.write().unwrap();

        let tree = repo.find_tree(root_id).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let commit_id = repo
            .commit(Some("refs/heads/main"), &sig, &sig, "tree fixture", &tree, &[])
            .unwrap();

        let repo = Repository::open_bare(dir.path().join("demo.git")).unwrap();
        (dir, repo, commit_id)
    }

    fn seg(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_path_is_root_tree() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        let tree = navigate(&repo, &commit, &[]).unwrap();
        assert!(tree.get_name("a.txt").is_some());
    }

    #[test]
    fn descends_into_subdirectory() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        let tree = navigate(&repo, &commit, &seg(&["sub"])).unwrap();
        assert!(tree.get_name("b.txt").is_some());
        assert!(tree.get_name("a.txt").is_none());
    }

    #[test]
    fn missing_segment_is_path_not_found() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        assert!(matches!(
            navigate(&repo, &commit, &seg(&["nope"])),
            Err(AppError::PathNotFound(_))
        ));
    }

    #[test]
    fn blob_mid_path_is_path_not_found() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        assert!(matches!(
            navigate(&repo, &commit, &seg(&["a.txt", "deeper"])),
            Err(AppError::PathNotFound(_))
        ));
    }

    #[test]
    fn lists_entries_in_backend_order() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        let tree = navigate(&repo, &commit, &[]).unwrap();
        let items = list_entries(&tree);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "a.txt");
        assert_eq!(items[0].kind, EntryKind::Blob);
        assert_eq!(items[1].name, "bin.dat");
        assert_eq!(items[2].name, "sub");
        assert_eq!(items[2].kind, EntryKind::Tree);
    }

    #[test]
    fn finds_text_file() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        let tree = navigate(&repo, &commit, &[]).unwrap();
        match find_file(&repo, &tree, "a.txt").unwrap() {
            FileLookup::Found(blob) => {
                assert_eq!(blob.bytes, b"hello\n");
                assert!(!blob.is_binary);
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn classifies_binary_file() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        let tree = navigate(&repo, &commit, &[]).unwrap();
        match find_file(&repo, &tree, "bin.dat").unwrap() {
            FileLookup::Found(blob) => assert!(blob.is_binary),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        let tree = navigate(&repo, &commit, &[]).unwrap();
        assert!(matches!(
            find_file(&repo, &tree, "nope.txt").unwrap(),
            FileLookup::Missing
        ));
    }

    #[test]
    fn directory_looked_up_as_file_reports_kind() {
        let (_dir, repo, id) = repo_with_tree();
        let commit = repo.find_commit(id).unwrap();
        let tree = navigate(&repo, &commit, &[]).unwrap();
        match find_file(&repo, &tree, "sub").unwrap() {
            FileLookup::WrongKind(kind) => assert_eq!(kind, "tree"),
            other => panic!("expected WrongKind, got {other:?}"),
        }
    }
}
