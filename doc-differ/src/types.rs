use nav_table::{Navlink, TablePath};

/// A row that needs to be created on the forum, with no prior remote state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAction {
    pub level: u32,
    pub path: TablePath,
    pub navlink_title: String,
    pub content: Option<String>,
}

/// Describes how a row's navlink changed between the remote and local trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavlinkChange {
    pub old: Navlink,
    pub new: Navlink,
}

/// Describes how a document's content changed between the remote and local
/// trees. Always `None`/`None` for group rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub old: Option<String>,
    pub new: Option<String>,
}

/// A row present on both sides whose navlink title and/or level and/or
/// content differs, and so needs its remote state brought in line with the
/// local tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAction {
    pub level: u32,
    pub path: TablePath,
    pub navlink_change: NavlinkChange,
    pub content_change: ContentChange,
}

/// A row present remotely but no longer present locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAction {
    pub level: u32,
    pub path: TablePath,
    pub navlink: Navlink,
    pub content: Option<String>,
}

/// A row present on both sides with nothing to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoopAction {
    pub level: u32,
    pub path: TablePath,
    pub navlink: Navlink,
    pub content: Option<String>,
}

/// The outcome of comparing one local row against the remote index: exactly
/// one reconciling step to bring the remote topic tree in line with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create(CreateAction),
    Update(UpdateAction),
    Delete(DeleteAction),
    Noop(NoopAction),
}

impl Action {
    pub fn path(&self) -> &TablePath {
        match self {
            Action::Create(a) => &a.path,
            Action::Update(a) => &a.path,
            Action::Delete(a) => &a.path,
            Action::Noop(a) => &a.path,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Action::Create(_) => "create",
            Action::Update(_) => "update",
            Action::Delete(_) => "delete",
            Action::Noop(_) => "noop",
        };
        write!(f, "{}({})", kind, self.path())
    }
}
