use std::fmt;

/// The dash-joined identifier for a row, globally unique within an index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TablePath(String);

impl TablePath {
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    /// Builds the path of a child named `name` under this group.
    pub fn join(&self, name: &str) -> Self {
        Self(format!("{}-{}", self.0, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strips this path's own prefix (plus the `-` separator) from `child`,
    /// returning the remainder. If `child` does not actually start with this
    /// path's prefix, `None` is returned.
    pub fn strip_prefix_of<'a>(&self, child: &'a str) -> Option<&'a str> {
        child
            .strip_prefix(self.0.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
    }
}

impl fmt::Display for TablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TablePath {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for TablePath {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// A displayable pair of title and (optional) link. The link is absent for
/// group rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navlink {
    pub title: String,
    pub link: Option<String>,
}

impl Navlink {
    pub fn group(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
        }
    }

    pub fn document(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: Some(link.into()),
        }
    }
}

/// A single row of the navigation table, either a group (no link) or a
/// document (link present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub level: u32,
    pub path: TablePath,
    pub navlink: Navlink,
}

impl TableRow {
    pub fn new(level: u32, path: TablePath, navlink: Navlink) -> Self {
        Self {
            level,
            path,
            navlink,
        }
    }

    pub fn is_document(&self) -> bool {
        self.navlink.link.is_some()
    }

    pub fn is_group(&self) -> bool {
        !self.is_document()
    }
}
