//! Browse coordinates and their URL scheme.
//!
//! Every page is addressed as
//! `/git/{repo}/{branch}/{commit}/{type}[/{path...}[/{file}]]`, and every
//! link a page emits is produced by [`Coordinates::href`], so decoding and
//! re-encoding are exact inverses. The first four segments are mandatory;
//! the remainder is interpreted per view type: a `tree` keeps the whole
//! tail as its directory path, while `blob` and `diff` split the last
//! segment off as the file name.

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectType {
    Tree,
    Blob,
    Diff,
    /// Unrecognized type segment, carried through verbatim and rendered as a
    /// placeholder instead of being rejected at decode time.
    Other(String),
}

impl ObjectType {
    pub fn parse(segment: &str) -> Self {
        match segment {
            "tree" => ObjectType::Tree,
            "blob" => ObjectType::Blob,
            "diff" => ObjectType::Diff,
            other => ObjectType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Tree => "tree",
            ObjectType::Blob => "blob",
            ObjectType::Diff => "diff",
            ObjectType::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub repo: String,
    pub branch: String,
    pub commit: String,
    pub object_type: ObjectType,
    pub path: Vec<String>,
    pub file_name: String,
}

impl Coordinates {
    /// Decode a request path with the `/git/` prefix already stripped.
    ///
    /// Exactly four `/`-delimited segments are consumed; everything after
    /// them (which may itself contain `/`) is the tail.
    pub fn decode(rest: &str) -> Result<Self> {
        let mut segments = rest.splitn(5, '/');
        let (repo, branch, commit, type_segment) = match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(r), Some(b), Some(c), Some(t)) => (r, b, c, t),
            _ => return Err(AppError::MalformedRoute(rest.to_string())),
        };
        let tail = segments.next().unwrap_or("");

        let object_type = ObjectType::parse(type_segment);
        let (path, file_name) = match object_type {
            ObjectType::Tree => (split_path(tail), String::new()),
            _ => match tail.rfind('/') {
                Some(i) => (split_path(&tail[..i]), tail[i + 1..].to_string()),
                None => (Vec::new(), tail.to_string()),
            },
        };

        Ok(Self {
            repo: repo.to_string(),
            branch: branch.to_string(),
            commit: commit.to_string(),
            object_type,
            path,
            file_name,
        })
    }

    /// Re-encode into the URL these coordinates were decoded from.
    pub fn href(&self) -> String {
        let mut url = format!(
            "/git/{}/{}/{}/{}",
            self.repo,
            self.branch,
            self.commit,
            self.object_type.as_str()
        );
        if !self.path.is_empty() {
            url.push('/');
            url.push_str(&self.path.join("/"));
        }
        if !self.file_name.is_empty() {
            url.push('/');
            url.push_str(&self.file_name);
        }
        url
    }

    /// Same view anchored at a different commit spec.
    pub fn at_commit(&self, spec: impl Into<String>) -> Self {
        Self {
            commit: spec.into(),
            ..self.clone()
        }
    }

    /// The tree view one path segment up from the current path.
    pub fn parent_tree(&self) -> Self {
        let mut path = self.path.clone();
        path.pop();
        Self {
            object_type: ObjectType::Tree,
            path,
            file_name: String::new(),
            ..self.clone()
        }
    }

    /// The tree view of a directory entry at the current level.
    pub fn child_dir(&self, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(name.to_string());
        Self {
            object_type: ObjectType::Tree,
            path,
            file_name: String::new(),
            ..self.clone()
        }
    }

    /// The blob view of a file entry at the current level.
    pub fn child_file(&self, name: &str) -> Self {
        Self {
            object_type: ObjectType::Blob,
            file_name: name.to_string(),
            ..self.clone()
        }
    }
}

fn split_path(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split('/').map(str::to_string).collect()
    }
}
