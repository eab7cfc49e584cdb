use std::cmp::min;

use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::{Counts, Task};

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[✓]"
    } else {
        "[ ]"
    }
}

/// One list row: checkbox, id, then either the stored text or the scratch
/// text of an edit in progress.
pub fn task_line(task: &Task, scratch: Option<&str>) -> Line<'static> {
    let id_style = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(
            format!("{} ", checkbox(task.completed)),
            Style::default().fg(if task.completed {
                Color::Green
            } else {
                Color::Gray
            }),
        ),
        Span::styled(format!("#{:<4}", task.id.get()), id_style),
    ];

    match scratch {
        Some(text) => {
            spans.push(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
            spans.push(Span::styled("  ✏️ editing", id_style));
        }
        None if task.completed => spans.push(Span::styled(
            task.text.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )),
        None => spans.push(Span::styled(
            task.text.clone(),
            Style::default().fg(Color::White),
        )),
    }

    Line::from(spans)
}

/// Header badge, hidden while the list is empty.
pub fn header_counts(counts: Counts) -> Option<String> {
    if counts.is_empty() {
        None
    } else {
        Some(format!("({counts})"))
    }
}

/// Footer tally, hidden while the list is empty.
pub fn footer_counts(counts: Counts) -> Option<String> {
    if counts.is_empty() {
        return None;
    }
    Some(format!(
        "Total tasks: {} • Completed: {} • Remaining: {}",
        counts.total,
        counts.completed,
        counts.remaining()
    ))
}

pub fn format_task_detail_entries(task: &Task, editing: bool) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    entries.push((String::from("Task"), task.text.clone()));
    entries.push((String::from("ID"), format!("#{}", task.id)));
    entries.push((
        String::from("Status"),
        String::from(if task.completed { "completed" } else { "open" }),
    ));
    entries.push((String::from("Created"), format_datetime(&task.created_at)));
    if editing {
        entries.push((String::from("Editing"), String::from("unsaved changes pending")));
    }
    entries
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / k or ↓ / ↑", "Move selection"),
        ("Home / End", "Jump to first / last task"),
        ("a", "Add a new task"),
        ("e / Enter", "Edit selected task"),
        ("Space / d", "Toggle completed"),
        ("x / Delete", "Delete task (with confirmation)"),
        ("i", "Show task details"),
        ("/", "Command palette"),
        ("Ctrl+W", "Delete previous word while typing"),
        ("h / ?", "Toggle this help overlay"),
        ("Esc", "Cancel edit / close overlays"),
        ("q / Ctrl+C", "Quit"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = (*value).into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
