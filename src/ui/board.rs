use console::style;

use crate::board::{Board, Column};
use crate::ui::icons::{CARD, COLLAPSED, EXPANDED};
use crate::ui_state::UiState;

/// Render the board column by column. Collapsed columns show only their header.
pub fn render_board(board: &Board, columns: &[Column], state: &UiState) -> String {
    let mut out = String::new();

    for column in columns {
        let cards = board.cards(*column);
        let collapsed = state.is_collapsed(*column);
        let marker = if collapsed { COLLAPSED } else { EXPANDED };

        out.push_str(&format!(
            "{}{} {}\n",
            marker,
            style(column.title()).bold(),
            style(format!("({})", cards.len())).dim()
        ));

        if collapsed {
            continue;
        }

        if cards.is_empty() {
            out.push_str(&format!("    {}\n", style("no issues").dim()));
        }
        for card in cards {
            out.push_str(&format!(
                "  {}{} {}",
                CARD,
                style(format!("#{}", card.number)).cyan(),
                card.title
            ));
            let extra: Vec<&str> = card
                .labels
                .iter()
                .filter(|label| Column::from_label(label).is_none())
                .map(String::as_str)
                .collect();
            if !extra.is_empty() {
                out.push_str(&format!(" {}", style(format!("[{}]", extra.join(", "))).dim()));
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{GitHubIssue, GitHubLabel};

    fn board() -> Board {
        let issue = |number: u64, labels: &[&str]| GitHubIssue {
            number,
            title: format!("Card {}", number),
            body: None,
            state: "open".to_string(),
            html_url: String::new(),
            labels: labels
                .iter()
                .map(|name| GitHubLabel {
                    name: name.to_string(),
                    color: None,
                })
                .collect(),
            pull_request: None,
        };
        Board::from_issues(&[issue(1, &["status:todo", "bug"]), issue(2, &["done"])])
    }

    #[test]
    fn test_render_shows_cards_and_counts() {
        let out = console::strip_ansi_codes(&render_board(
            &board(),
            &Column::ALL,
            &UiState::default(),
        ))
        .to_string();
        assert!(out.contains("To Do (1)"));
        assert!(out.contains("#1 Card 1 [bug]"));
        assert!(out.contains("Backlog (0)"));
        assert!(out.contains("no issues"));
    }

    #[test]
    fn test_collapsed_column_hides_cards() {
        let mut state = UiState::default();
        state.set_collapsed(Column::Done, true);
        let out = console::strip_ansi_codes(&render_board(&board(), &Column::ALL, &state))
            .to_string();
        assert!(out.contains("Done (1)"));
        assert!(!out.contains("Card 2"));
    }

    #[test]
    fn test_only_requested_columns_render() {
        let out = console::strip_ansi_codes(&render_board(
            &board(),
            &[Column::Todo],
            &UiState::default(),
        ))
        .to_string();
        assert!(out.contains("To Do"));
        assert!(!out.contains("Backlog"));
    }
}
