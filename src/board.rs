//! Kanban board built from GitHub issues.
//!
//! Columns live in issue labels: `status:<column>` or the bare column name
//! (`in_progress`, `in progress` and `in-progress` are all accepted). Closed
//! issues are always `done`; open issues without a column label are `backlog`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BoardError;
use crate::github::GitHubIssue;

const STATUS_LABEL_PREFIX: &str = "status:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Backlog,
        Column::Todo,
        Column::InProgress,
        Column::Review,
        Column::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    /// Label written to an issue moved into this column.
    pub fn label(&self) -> String {
        format!("{}{}", STATUS_LABEL_PREFIX, self.as_str())
    }

    /// Column named by a label, if it is a column label at all.
    pub fn from_label(label: &str) -> Option<Self> {
        let lowered = label.trim().to_lowercase();
        let name = lowered
            .strip_prefix(STATUS_LABEL_PREFIX)
            .unwrap_or(&lowered)
            .trim();
        name.replace([' ', '-'], "_").parse().ok()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(BoardError::UnknownColumn {
                column: s.to_string(),
            }),
        }
    }
}

/// One issue as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub number: u64,
    pub title: String,
    pub labels: Vec<String>,
    pub html_url: String,
}

/// Column placement for an issue.
pub fn column_for(issue: &GitHubIssue) -> Column {
    if issue.state.eq_ignore_ascii_case("closed") {
        return Column::Done;
    }
    issue
        .labels
        .iter()
        .find_map(|label| Column::from_label(&label.name))
        .unwrap_or(Column::Backlog)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    pub columns: BTreeMap<Column, Vec<Card>>,
}

impl Board {
    /// Group issues into columns, ordered by issue number within a column.
    pub fn from_issues(issues: &[GitHubIssue]) -> Self {
        let mut columns: BTreeMap<Column, Vec<Card>> =
            Column::ALL.iter().map(|c| (*c, Vec::new())).collect();

        for issue in issues.iter().filter(|i| i.pull_request.is_none()) {
            columns.entry(column_for(issue)).or_default().push(Card {
                number: issue.number,
                title: issue.title.clone(),
                labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
                html_url: issue.html_url.clone(),
            });
        }

        for cards in columns.values_mut() {
            cards.sort_by_key(|card| card.number);
        }

        Self { columns }
    }

    pub fn cards(&self, column: Column) -> &[Card] {
        self.columns.get(&column).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Label set for an issue after moving it into `target`.
///
/// Every other column label is dropped, unrelated labels are kept in order.
pub fn relabel_for_move(labels: &[String], target: Column) -> Vec<String> {
    let mut next: Vec<String> = labels
        .iter()
        .filter(|label| Column::from_label(label).is_none())
        .cloned()
        .collect();
    next.push(target.label());
    next
}
