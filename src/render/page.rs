//! Page composition: the repository index, the four-panel browse view, and
//! the generic error page.
//!
//! A browse page has a header row (site link, branch panel, log panel), a
//! tree panel, and a content area holding the blob or diff fragment. Every
//! link is produced by `Coordinates::href`, so each page is self-navigable
//! through the same URL scheme it was addressed by. Resolution failures
//! degrade the page (empty panels, inline placeholders); only builder
//! overflow and backend I/O errors abort the request.

use std::path::Path;
use std::time::SystemTime;

use git2::{Oid, Repository, Tree};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::git::{self, history::HistoryWalk, RepoSession, Resolved};
use crate::models::{short_id, Coordinates, DiffLineKind, EntryKind, FileLookup, ObjectType};
use crate::render::html::{escape_html, HtmlBuf};

const STYLE: &str = "body { font-family: monospace; margin: 0; } \
div.mainlink { font-family: monospace; font-size: 24pt; } \
div.box { border: 1px solid rgb(118,118,118); margin: 10px; overflow: hidden; position: relative; } \
div.subbox { margin: 0; width: 100%; height: 100%; float: left; } \
div.diff { border: 1px solid rgb(118, 118, 118); width: 100%; height: 100%; font-family: monospace; overflow-y: scroll; }";

/// Render the full browse view for decoded coordinates.
pub fn view_page(config: &AppConfig, coords: &Coordinates) -> Result<String> {
    let mut out = HtmlBuf::with_limit(config.max_page_bytes);
    out.push("<html>\n<head>\n<style>")?;
    out.push(STYLE)?;
    out.push("</style>\n</head>\n<body>\n")?;

    out.push("<div class=\"box\" style=\"height: 10%;\">\n")?;
    out.push("<div class=\"subbox mainlink\" style=\"width: 10%;\"><a href=\"/git\">git</a></div>\n")?;

    let session = match open_and_resolve(&config.root, coords) {
        Ok(opened) => Some(opened),
        Err(e) => {
            warn!(
                repo = %coords.repo,
                branch = %coords.branch,
                commit = %coords.commit,
                "reference resolution failed: {e}"
            );
            None
        }
    };

    match &session {
        Some((session, resolved)) => {
            render_branches(&mut out, session, coords)?;
            let mut walk = HistoryWalk::new(session.repo(), resolved.tip, resolved.target)?;
            render_log(&mut out, &mut walk, coords)?;
            let diff_base = walk.diff_base();
            out.push("</div>\n")?;
            render_tree_and_content(&mut out, session, resolved, diff_base, coords)?;
        }
        None => {
            out.push("<div class=\"subbox\" style=\"width: 20%; overflow-y: scroll;\">\n</div>\n")?;
            out.push("<div class=\"subbox\" style=\"width: 70%; overflow-y: scroll;\">\n</div>\n")?;
            out.push("</div>\n")?;
            out.push("<div class=\"box\" style=\"height: 20%; overflow-y: scroll;\">\n</div>\n")?;
        }
    }

    out.push("</body>\n</html>")?;
    Ok(out.finish())
}

fn open_and_resolve(root: &Path, coords: &Coordinates) -> Result<(RepoSession, Resolved)> {
    let session = RepoSession::open(root, &coords.repo)?;
    let resolved = session.resolve(&coords.branch, &coords.commit)?;
    Ok((session, resolved))
}

fn render_branches(out: &mut HtmlBuf, session: &RepoSession, coords: &Coordinates) -> Result<()> {
    out.push("<div class=\"subbox\" style=\"width: 20%; overflow-y: scroll;\">\n")?;
    for branch in session.branches()? {
        let href = Coordinates {
            repo: coords.repo.clone(),
            branch: branch.name.clone(),
            commit: branch.tip.to_string(),
            object_type: ObjectType::Tree,
            path: Vec::new(),
            file_name: String::new(),
        }
        .href();
        let marker = if branch.name == coords.branch { "> " } else { "" };
        out.push(&format!(
            "<a href=\"{}\">[branch] {}{}</a><br />\n",
            href,
            marker,
            escape_html(&branch.name)
        ))?;
    }
    out.push("</div>\n")?;
    Ok(())
}

fn render_log(out: &mut HtmlBuf, walk: &mut HistoryWalk<'_>, coords: &Coordinates) -> Result<()> {
    out.push("<div class=\"subbox\" style=\"width: 70%; overflow-y: scroll;\">\n")?;
    for entry in walk {
        let entry = entry?;
        let short = short_id(&entry.id);
        let here = coords.at_commit(short.clone());
        let diff_here = Coordinates {
            object_type: ObjectType::Diff,
            path: Vec::new(),
            file_name: String::new(),
            ..here.clone()
        };
        let marker = if entry.is_target { "> " } else { "" };
        out.push(&format!(
            "<a href=\"{}\">[{}] {}{}</a> (<a href=\"{}\">diff</a>)<br />\n",
            here.href(),
            short,
            marker,
            escape_html(&entry.summary),
            diff_here.href()
        ))?;
    }
    out.push("</div>\n")?;
    Ok(())
}

fn render_tree_and_content(
    out: &mut HtmlBuf,
    session: &RepoSession,
    resolved: &Resolved,
    diff_base: Option<Oid>,
    coords: &Coordinates,
) -> Result<()> {
    let repo = session.repo();
    let commit = repo.find_commit(resolved.target)?;

    out.push("<div class=\"box\" style=\"height: 20%; overflow-y: scroll;\">\n")?;
    let subtree = match git::tree::navigate(repo, &commit, &coords.path) {
        Ok(tree) => Some(tree),
        Err(e) => {
            debug!(
                repo = %coords.repo,
                branch = %coords.branch,
                commit = %coords.commit,
                path = %coords.path.join("/"),
                "path did not resolve: {e}"
            );
            out.push("<pre>Path not found :{</pre>\n")?;
            None
        }
    };

    if let Some(subtree) = &subtree {
        if !coords.path.is_empty() {
            out.push(&format!(
                "<a href=\"{}\">[tree] ..</a><br />\n",
                coords.parent_tree().href()
            ))?;
        }
        for item in git::tree::list_entries(subtree) {
            let (href, icon) = match item.kind {
                EntryKind::Tree => (coords.child_dir(&item.name).href(), "&#x1F4C1"),
                EntryKind::Blob => (coords.child_file(&item.name).href(), "&#x1F4C4"),
            };
            let marker = if !coords.file_name.is_empty() && item.name == coords.file_name {
                "> "
            } else {
                ""
            };
            out.push(&format!(
                "<a href=\"{}\">{}\t{}{}</a><br />\n",
                href,
                icon,
                marker,
                escape_html(&item.name)
            ))?;
        }
    }
    out.push("</div>\n")?;

    if let Some(subtree) = &subtree {
        match &coords.object_type {
            ObjectType::Tree => {}
            ObjectType::Blob => render_blob(out, repo, subtree, coords)?,
            ObjectType::Diff => render_diff(out, repo, subtree, diff_base, coords)?,
            ObjectType::Other(ty) => {
                out.push(&format!(
                    "<pre>Unknown view '{}' >:(</pre>\n",
                    escape_html(ty)
                ))?;
            }
        }
    }
    Ok(())
}

fn render_blob(
    out: &mut HtmlBuf,
    repo: &Repository,
    subtree: &Tree<'_>,
    coords: &Coordinates,
) -> Result<()> {
    match git::tree::find_file(repo, subtree, &coords.file_name)? {
        FileLookup::Found(blob) if blob.is_binary => {
            out.push("<pre>Binary file :[</pre>\n")?;
        }
        FileLookup::Found(blob) => {
            out.push("<pre style=\"height: calc(70% - 46px); margin: 10px;\"><div readonly class=\"diff\">")?;
            out.push_escaped_bytes(&blob.bytes)?;
            out.push("</div></pre>\n")?;
        }
        FileLookup::Missing => {
            out.push("<pre>File not found :{</pre>\n")?;
        }
        FileLookup::WrongKind(kind) => {
            out.push(&format!(
                "<pre>Error loading {} entry! >:(</pre>\n",
                escape_html(&kind)
            ))?;
        }
    }
    Ok(())
}

fn render_diff(
    out: &mut HtmlBuf,
    repo: &Repository,
    subtree: &Tree<'_>,
    diff_base: Option<Oid>,
    coords: &Coordinates,
) -> Result<()> {
    // Baseline: the same path in the next-older commit. No baseline commit
    // (root commit or unreachable target), or a path that does not exist
    // there yet, diffs against no prior state.
    let base_commit = match diff_base {
        Some(id) => Some(repo.find_commit(id)?),
        None => None,
    };
    let base_tree = base_commit
        .as_ref()
        .and_then(|commit| git::tree::navigate(repo, commit, &coords.path).ok());

    out.push("<pre style=\"height: calc(70% - 46px); margin: 10px;\"><div readonly class=\"diff\">")?;
    let mut overflow = None;
    git::diff::foreach_line(repo, base_tree.as_ref(), subtree, |kind, old_ln, new_ln, content| {
        match push_diff_line(out, kind, old_ln, new_ln, content) {
            Ok(()) => true,
            Err(e) => {
                overflow = Some(e);
                false
            }
        }
    })?;
    if let Some(e) = overflow {
        return Err(e);
    }
    out.push("</div></pre>\n")?;
    Ok(())
}

fn push_diff_line(
    out: &mut HtmlBuf,
    kind: DiffLineKind,
    old_ln: Option<u32>,
    new_ln: Option<u32>,
    content: &[u8],
) -> Result<()> {
    match kind {
        DiffLineKind::Added => out.push(&format!(
            "<span style=\"color: green;\">+ {:>6}",
            new_ln.unwrap_or(0)
        ))?,
        DiffLineKind::Removed => out.push(&format!(
            "<span style=\"color: red;\">- {:>6}",
            old_ln.unwrap_or(0)
        ))?,
        DiffLineKind::Header => out.push("<span>")?,
        DiffLineKind::Context => {}
    }
    out.push_escaped_bytes(content)?;
    if kind != DiffLineKind::Context {
        out.push("</span>")?;
    }
    Ok(())
}

/// List the repositories under the storage root, newest-modified first.
/// Links use the default branch and a symbolic HEAD spec; no object-graph
/// resolution happens here.
pub fn index_page(config: &AppConfig) -> Result<String> {
    let mut out = HtmlBuf::with_limit(config.max_page_bytes);
    out.push("<html>\n")?;

    let mut repos: Vec<(String, SystemTime)> = Vec::new();
    for dir_entry in std::fs::read_dir(&config.root)? {
        let dir_entry = dir_entry?;
        let name = dir_entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(".git") {
            continue;
        }
        match dir_entry.file_type() {
            Ok(kind) if kind.is_dir() => {}
            _ => continue,
        }
        let modified = dir_entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        repos.push((name, modified));
    }
    repos.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    for (name, _) in repos {
        let href = Coordinates {
            repo: name.clone(),
            branch: "main".to_string(),
            commit: "HEAD".to_string(),
            object_type: ObjectType::Tree,
            path: Vec::new(),
            file_name: String::new(),
        }
        .href();
        out.push(&format!(
            "<a href=\"{}\">{}</a><br />\n",
            href,
            escape_html(&name)
        ))?;
    }

    out.push("</html>\n")?;
    Ok(out.finish())
}

/// Minimal document used when a request cannot be rendered at all. Served
/// with status 200 like every other page.
pub fn error_page(message: &str) -> String {
    format!(
        "<html>\n<body>\n<pre>{} >:(</pre>\n</body>\n</html>\n",
        escape_html(message)
    )
}
