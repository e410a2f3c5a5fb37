//! Maps classified badge values to icon, label and color.
//!
//! Only consumes `StatusValue` / `CoverageValue`; never looks at badge bodies.

use console::{Color, Emoji, style};

use crate::badge::{BadgeKind, BadgeValue, CoverageValue, StatusValue};
use crate::refresh::DashboardSnapshot;
use crate::ui::icons::{CHART, CHECK, CROSS, QUESTION, QUEUED, RUNNING};

/// How one badge value is drawn.
#[derive(Clone, Copy)]
pub struct Presentation {
    pub icon: Emoji<'static, 'static>,
    pub label: &'static str,
    pub color: Color,
}

pub fn status_presentation(status: StatusValue) -> Presentation {
    match status {
        StatusValue::Success => Presentation {
            icon: CHECK,
            label: "passing",
            color: Color::Green,
        },
        StatusValue::Failure => Presentation {
            icon: CROSS,
            label: "failing",
            color: Color::Red,
        },
        StatusValue::InProgress => Presentation {
            icon: RUNNING,
            label: "running",
            color: Color::Yellow,
        },
        StatusValue::Queued => Presentation {
            icon: QUEUED,
            label: "queued",
            color: Color::Cyan,
        },
        StatusValue::Unknown => Presentation {
            icon: QUESTION,
            label: "unknown",
            color: Color::White,
        },
    }
}

/// Color band for a coverage percentage.
pub fn coverage_color(coverage: CoverageValue) -> Color {
    match coverage.as_percent() {
        Some(percent) if percent >= 80.0 => Color::Green,
        Some(percent) if percent >= 60.0 => Color::Yellow,
        Some(_) => Color::Red,
        None => Color::White,
    }
}

pub fn render_status_line(kind: BadgeKind, status: StatusValue) -> String {
    let presentation = status_presentation(status);
    format!(
        "{}{:<9} {}",
        presentation.icon,
        kind.as_str(),
        style(presentation.label).fg(presentation.color).bold()
    )
}

pub fn render_coverage_line(coverage: CoverageValue) -> String {
    format!(
        "{}{:<9} {}",
        CHART,
        BadgeKind::Coverage.as_str(),
        style(coverage.to_string()).fg(coverage_color(coverage)).bold()
    )
}

pub fn render_value(kind: BadgeKind, value: BadgeValue) -> String {
    match value {
        BadgeValue::Status(status) => render_status_line(kind, status),
        BadgeValue::Coverage(coverage) => render_coverage_line(coverage),
    }
}

/// One line per badge in `BadgeKind::ALL` order; missing readings show as unknown.
pub fn render_snapshot(snapshot: &DashboardSnapshot) -> String {
    let mut lines = Vec::new();
    for kind in BadgeKind::ALL {
        let value = snapshot
            .get(kind)
            .map(|reading| reading.value)
            .unwrap_or_else(|| BadgeValue::unknown_for(kind));
        let mut line = render_value(kind, value);
        if let Some(reading) = snapshot.get(kind) {
            line.push_str(&format!(
                "  {}",
                style(reading.fetched_at.format("%H:%M:%S").to_string()).dim()
            ));
        }
        lines.push(line);
    }
    lines.join("\n")
}
