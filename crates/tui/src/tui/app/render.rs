use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap,
};
use ratatui::Frame;

use crate::core::{Snapshot, TaskId};
use crate::tui::constants::APP_VERSION;
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, footer_counts, format_task_detail_entries,
    header_counts, inset_rect, task_line, BG_ACCENT, BG_BASE, BG_PANEL, FG_ACCENT,
};

use super::{App, ConfirmChoice, InputMode};

const DRAFT_PLACEHOLDER: &str = "Add a new task...";

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let snapshot = self.snapshot();
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(size);

        draw_header(f, chunks[0], &snapshot);
        self.draw_draft(f, chunks[1], &snapshot);
        draw_list(f, chunks[2], &snapshot, &mut self.list_state);
        self.draw_footer(f, chunks[3], &snapshot);

        match self.input_mode {
            InputMode::Edit | InputMode::Command => self.draw_input_overlay(f, size),
            InputMode::Inspect => {
                if let Some(id) = self.inspect_task {
                    draw_detail_overlay(f, size, &snapshot, id);
                }
            }
            InputMode::Help => draw_help_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size, &snapshot),
            InputMode::Normal | InputMode::Add => {}
        }
    }

    /// The new-task box. While adding, it shows the live input and the
    /// cursor; otherwise the stored draft or a placeholder.
    fn draw_draft(&self, f: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
        let adding = self.input_mode == InputMode::Add;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("➕ New Task"))
            .border_style(Style::default().fg(if adding {
                FG_ACCENT
            } else {
                Color::DarkGray
            }))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let text = if adding {
            self.input.as_str()
        } else {
            snapshot.draft()
        };
        let line = if text.is_empty() {
            Line::from(Span::styled(
                DRAFT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(text.to_string(), Style::default().fg(Color::White)))
        };
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_PANEL)),
            inner,
        );

        if adding && inner.width > 0 {
            let column = min(self.input.cursor_column() as u16, inner.width - 1);
            f.set_cursor(inner.x + column, inner.y);
        }
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let status_line = match &self.status {
            Some(status) => Line::from(vec![Span::styled(status.text.clone(), status.style())]),
            None => Line::from(vec![Span::raw("Ready")]),
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        if let Some(tally) = footer_counts(snapshot.counts()) {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    tally,
                    Style::default().fg(Color::Gray),
                ))),
                lines[1],
            );
        }

        let help = match self.input_mode {
            InputMode::Normal => {
                "j/k move | a add ✚ | e edit ✏️ | space toggle ✅ | x delete 🗑️ | i details ℹ️ | / command ⌨️ | h help ❔ | q quit"
            }
            InputMode::Add => "Enter to add ✍️ • Esc to close (draft is kept)",
            InputMode::Edit => "Enter to save ✏️ • Esc to cancel",
            InputMode::Command => {
                "Up/Down navigate • Tab/Right complete • Enter select/run • Esc cancel"
            }
            InputMode::Inspect => "Enter/Esc to close ℹ️",
            InputMode::Help => "Enter/Esc to close ❔",
            InputMode::ConfirmDelete => "←/→ choose • y/n • Enter confirm • Esc cancel",
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                help,
                Style::default().fg(Color::DarkGray),
            ))),
            lines[2],
        );
    }

    fn draw_input_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(10), 80);
        let extra_height = match self.input_mode {
            InputMode::Command => self.suggestions.len().min(6) as u16 + 2,
            _ => 0,
        };
        let popup_area = centered_rect(width, 3 + extra_height, area);
        f.render_widget(Clear, popup_area);

        let title = match self.input_mode {
            InputMode::Command => String::from("⌨️ Command"),
            _ => match self.controller.snapshot().editing() {
                Some(session) => format!("✏️ Edit Task #{}", session.task_id),
                None => String::from("✏️ Edit Task"),
            },
        };
        let inner = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(popup_area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&title))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let input_area = input_block.inner(inner[0]);
        f.render_widget(input_block, inner[0]);
        f.render_widget(
            Paragraph::new(self.input.as_str()).style(Style::default().bg(BG_PANEL)),
            input_area,
        );
        if input_area.width > 0 {
            let column = min(self.input.cursor_column() as u16, input_area.width - 1);
            f.set_cursor(input_area.x + column, input_area.y);
        }

        if self.input_mode != InputMode::Command || inner[1].height == 0 {
            return;
        }

        let mut lines: Vec<Line> = Vec::with_capacity(self.suggestions.len() + 1);
        lines.push(Line::from(vec![Span::styled(
            "Suggestions",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )]));
        for (i, s) in self.suggestions.iter().enumerate() {
            let style = if i == self.suggestion_index {
                Style::default().fg(Color::Yellow).bg(BG_ACCENT)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(s.fill.clone(), style.add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(s.label.clone(), Style::default().fg(Color::DarkGray)),
            ]));
        }
        let suggestion_block = Block::default().style(Style::default().bg(BG_PANEL));
        let suggestion_inner = suggestion_block.inner(inner[1]);
        f.render_widget(suggestion_block, inner[1]);
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            suggestion_inner,
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🗑 Confirm Deletion"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let task_text = snapshot
            .tasks()
            .get(self.selected)
            .map(|task| task.text.as_str())
            .unwrap_or("selected task");

        let yes_style = if self.confirm_choice == ConfirmChoice::Yes {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let no_style = if self.confirm_choice == ConfirmChoice::No {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let lines = vec![
            Line::from(Span::styled(
                "This action cannot be undone.",
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                format!("Delete '{task_text}'?"),
                Style::default().fg(Color::White),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("  Yes  ", yes_style),
                Span::raw("    "),
                Span::styled("  No  ", no_style),
            ]),
        ];

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}

fn draw_header(f: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let mut spans = vec![Span::styled(
        format!(" tasklist v{APP_VERSION} ✅ "),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(badge) = header_counts(snapshot.counts()) {
        spans.push(Span::styled(badge, Style::default().fg(Color::Gray)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(BG_BASE)),
        area,
    );
}

fn draw_list(f: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, state: &mut ListState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(accent_title("Tasks"))
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(BG_PANEL));

    if snapshot.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let lines = vec![
            Line::from(Span::styled(
                "No tasks yet!",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Add your first task above to get started.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let height = min(lines.len() as u16 + 2, inner.height);
        let content = centered_rect(inner.width.min(60), height, inner);
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            content,
        );
        return;
    }

    let items: Vec<ListItem> = snapshot
        .tasks()
        .iter()
        .map(|task| {
            let scratch = snapshot
                .editing()
                .filter(|session| session.task_id == task.id)
                .map(|session| session.scratch.as_str());
            ListItem::new(task_line(task, scratch))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(BG_ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, state);
}

fn draw_detail_overlay(f: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, id: TaskId) {
    let Some(task) = snapshot.task(id) else {
        return;
    };
    let editing = snapshot.is_editing(id);
    let entries = format_task_detail_entries(task, editing);

    let width = min(area.width.saturating_sub(20), 90).max(40);
    let popup_height = (entries.len() as u16 + 6)
        .min(area.height.saturating_sub(2))
        .max(6);
    let popup_area = centered_rect(width, popup_height, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(accent_title("🗒 Task Details"))
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let rows: Vec<Row> = entries
        .into_iter()
        .map(|(key, value)| {
            Row::new(vec![
                Cell::from(key).style(Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD)),
                Cell::from(value),
            ])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(20)])
        .block(Block::default().style(Style::default().bg(BG_PANEL)))
        .column_spacing(2);
    f.render_widget(table, inset_rect(inner, 1));
}

fn draw_help_overlay(f: &mut Frame<'_>, area: Rect) {
    let entries = build_help_lines();
    let width = min(area.width.saturating_sub(10), 80);
    let height = min(entries.len() as u16 + 4, area.height.saturating_sub(2)).max(8);
    let popup_area = centered_rect(width, height, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(accent_title("⌨️ Keyboard Reference"))
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);
    if inner.width < 3 || inner.height < 3 {
        return;
    }

    let lines: Vec<Line> = entries
        .into_iter()
        .map(|(combo, desc)| {
            Line::from(vec![
                Span::styled(format!("{combo:<16}"), Style::default().fg(Color::Cyan)),
                Span::raw(desc),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(BG_PANEL)),
        inset_rect(inner, 1),
    );
}
