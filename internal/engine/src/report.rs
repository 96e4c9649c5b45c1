use nav_table::TableRow;

/// The outcome of executing (or migrating) a single action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportResult {
    Success,
    Skipped,
    Fail,
}

impl std::fmt::Display for ReportResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ReportResult::Success => "success",
            ReportResult::Skipped => "skip",
            ReportResult::Fail => "fail",
        };
        write!(f, "{tag}")
    }
}

/// One line of the run's outcome: what row (if any) it concerned, where
/// (a topic URL or a local path), what happened, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub row: Option<TableRow>,
    pub location: String,
    pub result: ReportResult,
    pub reason: Option<String>,
}
