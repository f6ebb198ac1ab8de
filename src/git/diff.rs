use git2::{DiffFormat, Repository, Tree};

use crate::models::DiffLineKind;

/// Stream the tree-to-tree patch through `sink` in the diff's native order:
/// per hunk, the header first, then added/removed/context lines top to
/// bottom. Nothing is buffered or reordered.
///
/// `old` of `None` means no prior state, so the whole new tree arrives as
/// additions. Patch-level file headers are not forwarded. The sink returns
/// `false` to abort the walk early; an abort is not an error here, the
/// caller knows why it stopped.
pub fn foreach_line<F>(
    repo: &Repository,
    old: Option<&Tree>,
    new: &Tree,
    mut sink: F,
) -> Result<(), git2::Error>
where
    F: FnMut(DiffLineKind, Option<u32>, Option<u32>, &[u8]) -> bool,
{
    let diff = repo.diff_tree_to_tree(old, Some(new), None)?;
    let mut aborted = false;
    let result = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let kind = match line.origin() {
            '+' => DiffLineKind::Added,
            '-' => DiffLineKind::Removed,
            ' ' => DiffLineKind::Context,
            'H' => DiffLineKind::Header,
            _ => return true,
        };
        if sink(kind, line.old_lineno(), line.new_lineno(), line.content()) {
            true
        } else {
            aborted = true;
            false
        }
    });
    match result {
        Ok(()) => Ok(()),
        Err(_) if aborted => Ok(()),
        Err(e) => Err(e),
    }
}
