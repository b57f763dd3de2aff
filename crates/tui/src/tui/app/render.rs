use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use todolist_core::drag::DragSession;
use todolist_core::{Category, VisibleRow};

use crate::tui::buffer::TextBuffer;
use crate::tui::constants::{APP_VERSION, DELETE_ZONE_WIDTH, MARKER_WIDTH};
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, inset_rect, row_color, BG_ACCENT, BG_BASE,
    BG_PANEL, BG_TAB_IDLE, FG_ACCENT, FG_DANGER,
};
use crate::tui::layout::{layout_rows, text_width, wrap_task, ROW_GAP};

use super::{App, ConfirmChoice, InputMode, Overlay};

/// How a single row is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowLook {
    Plain,
    Selected,
    /// Slot left behind by the lifted row.
    Vacated,
    DropTarget,
    Floating,
}

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_tabs(f, chunks[1]);
        self.draw_list(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        match self.input_mode() {
            InputMode::Compose => self.draw_compose_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size),
            InputMode::Details => self.draw_detail_overlay(f, size),
            InputMode::ExportPath | InputMode::ImportPath => self.draw_path_overlay(f, size),
            InputMode::Mail => self.draw_mail_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::Normal => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let category = self.category();
        let count = self.store.current_tasks().len();
        let line = Line::from(vec![
            Span::styled(
                format!(" todolist v{} ✅ ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "· {} · {} task{}",
                category.label(),
                count,
                if count == 1 { "" } else { "s" }
            )),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.config.db_path().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_tabs(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Categories"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let selected = self.category();
        let mut spans = Vec::new();
        let mut hits = Vec::new();
        let mut x = inner.x;
        for (position, category) in Category::ALL.into_iter().enumerate() {
            if position > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
                x = x.saturating_add(3);
            }
            let label = format!(
                " {} {} ({}) ",
                position + 1,
                category.label(),
                self.store.tasks(category).len()
            );
            let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            let style = if category == selected {
                Style::default()
                    .fg(Color::White)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray).bg(BG_TAB_IDLE)
            };
            hits.push((
                Rect {
                    x,
                    y: inner.y,
                    width,
                    height: inner.height.min(1),
                },
                category,
            ));
            spans.push(Span::styled(label, style));
            x = x.saturating_add(width);
        }
        self.tab_hits = hits;
        f.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn draw_list(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);
        self.list_area = inner;
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let tasks = self.store.current_tasks();
        if tasks.is_empty() {
            let lines = vec![
                Line::from(Span::styled(
                    format!("No {} tasks yet ✨", self.category().label()),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("Press 'a' to add one, or 'o' to import a file."),
            ];
            let content_area = centered_rect(inner.width.min(60), 4, inner);
            f.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(BG_PANEL)),
                content_area,
            );
            return;
        }

        let session = self.drag.session().copied();
        let rows = layout_rows(tasks, inner.width, self.scroll, inner.height);
        for row in &rows {
            let look = match session {
                Some(s) if s.dragged_index == row.index => RowLook::Vacated,
                Some(s) if s.target_index == row.index => RowLook::DropTarget,
                Some(_) => RowLook::Plain,
                None if row.index == self.selected => RowLook::Selected,
                None => RowLook::Plain,
            };
            self.draw_row(f, inner, row, &tasks[row.index], look);
        }

        if let Some(session) = session {
            self.draw_floating_row(f, inner, &session);
        }
    }

    fn draw_floating_row(&self, f: &mut Frame<'_>, inner: Rect, session: &DragSession) {
        let tasks = self.store.current_tasks();
        let Some(task) = tasks.get(session.dragged_index) else {
            return;
        };
        let rows = layout_rows(
            &tasks[session.dragged_index..=session.dragged_index],
            inner.width,
            0,
            inner.height,
        );
        let Some(row) = rows.first() else {
            return;
        };
        let lowest = (i32::from(inner.height) - row.size + 1).max(0);
        let top = session.floating_offset().clamp(0, lowest);
        let floating = VisibleRow {
            index: session.dragged_index,
            offset: top,
            size: row.size,
        };
        self.draw_row(f, inner, &floating, task, RowLook::Floating);
    }

    fn draw_row(
        &self,
        f: &mut Frame<'_>,
        inner: Rect,
        row: &VisibleRow,
        task: &str,
        look: RowLook,
    ) {
        let Ok(top) = u16::try_from(row.offset) else {
            return;
        };
        if top >= inner.height {
            return;
        }
        let text_lines = usize::try_from(row.size)
            .unwrap_or(0)
            .saturating_sub(ROW_GAP)
            .max(1);
        let height = u16::try_from(text_lines)
            .unwrap_or(u16::MAX)
            .min(inner.height - top);
        let area = Rect {
            x: inner.x,
            y: inner.y + top,
            width: inner.width,
            height,
        };

        let cue = self.cue_at.is_some();
        let (bg, fg, marker) = match look {
            RowLook::Plain => (row_color(row.index), Color::White, "  "),
            RowLook::Selected => (row_color(row.index), Color::Yellow, "▌ "),
            RowLook::Vacated => (BG_PANEL, Color::DarkGray, "  "),
            RowLook::DropTarget if cue => (BG_ACCENT, Color::White, "▶ "),
            RowLook::DropTarget => (row_color(row.index), Color::Gray, "▶ "),
            RowLook::Floating => (BG_ACCENT, Color::White, "≡ "),
        };
        let mut text_style = Style::default().fg(fg).bg(bg);
        if matches!(look, RowLook::Selected | RowLook::Floating) {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }
        if look == RowLook::DropTarget {
            text_style = text_style.add_modifier(Modifier::DIM);
        }

        f.render_widget(Clear, area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(MARKER_WIDTH),
                Constraint::Min(1),
                Constraint::Length(DELETE_ZONE_WIDTH),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(marker).style(Style::default().fg(FG_ACCENT).bg(bg)),
            columns[0],
        );

        let lines: Vec<Line> = if look == RowLook::Vacated {
            vec![Line::from("┄".repeat(usize::from(columns[1].width)))]
        } else {
            wrap_task(task, text_width(inner.width))
                .into_iter()
                .map(Line::from)
                .collect()
        };
        f.render_widget(Paragraph::new(lines).style(text_style), columns[1]);

        let delete_style = if self.drag.is_dragging() {
            Style::default().fg(Color::DarkGray).bg(bg)
        } else {
            Style::default().fg(FG_DANGER).bg(bg)
        };
        let delete = if look == RowLook::Vacated { "" } else { " ✖" };
        f.render_widget(Paragraph::new(delete).style(delete_style), columns[2]);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else if let Some(session) = self.drag.session() {
            Line::from(vec![Span::styled(
                format!(
                    "Moving #{} → #{} • release to drop • Esc cancels",
                    session.dragged_index + 1,
                    session.target_index + 1
                ),
                Style::default().fg(Color::Yellow),
            )])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode() {
            InputMode::Normal => {
                "nav: tab/1-3 categories | j/k move | J/K reorder | q quit | enter details ℹ️ | h help ❔ | a add ✚ | e edit ✏️ | x delete 🗑️ | s export 💾 | o import 📂 | m email ✉️"
            }
            InputMode::Compose => "Enter to save ✍️ • Esc to cancel",
            InputMode::ConfirmDelete => "←/→ choose • y/n • Enter confirm • Esc cancel",
            InputMode::Details => "n notify 🔔 • e edit • x delete • Enter/Esc close",
            InputMode::ExportPath | InputMode::ImportPath => "Enter to confirm • Esc to cancel",
            InputMode::Mail | InputMode::Help => "Enter/Esc to close",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_line_prompt(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        title: &str,
        buffer: &TextBuffer,
        hint: &str,
    ) {
        let width = min(area.width.saturating_sub(10), 80);
        let popup_area = centered_rect(width, 5, area);
        f.render_widget(Clear, popup_area);
        let inner = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(popup_area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(title))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let input_area = input_block.inner(inner[0]);
        f.render_widget(input_block, inner[0]);

        // keep the cursor in view on long input
        let column = u16::try_from(buffer.cursor_column()).unwrap_or(u16::MAX);
        let skip = column.saturating_sub(input_area.width.saturating_sub(1));
        let visible: String = buffer.as_str().chars().skip(usize::from(skip)).collect();
        f.render_widget(
            Paragraph::new(visible).style(Style::default().bg(BG_PANEL)),
            input_area,
        );
        if input_area.width > 0 && input_area.height > 0 {
            f.set_cursor(input_area.x + column - skip, input_area.y);
        }

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint.to_owned(),
                Style::default().fg(Color::DarkGray),
            )))
            .style(Style::default().bg(BG_PANEL)),
            inner[1],
        );
    }

    fn draw_compose_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let (title, hint) = if self.store.ui().is_editing() {
            ("✏️ Edit Task", " Enter saves the new text")
        } else {
            ("➕ Add Task", " Added at the end of the list")
        };
        self.draw_line_prompt(f, area, title, &self.input, hint);
    }

    fn draw_path_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let label = self.category().label();
        let (title, hint) = match self.overlay {
            Some(Overlay::ImportPath) => (
                format!("📂 Import into {}", label),
                " One task per line; replaces the current list",
            ),
            _ => (
                format!("💾 Export {}", label),
                " One task per line; existing files are overwritten",
            ),
        };
        self.draw_line_prompt(f, area, &title, &self.path_input, hint);
    }

    fn draw_detail_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(task) = self.store.ui().selected_task.as_deref() else {
            return;
        };

        let width = min(area.width.saturating_sub(20), 80).max(40);
        let text_lines = wrap_task(task, usize::from(width.saturating_sub(4)));
        let popup_height = (u16::try_from(text_lines.len()).unwrap_or(u16::MAX))
            .saturating_add(6)
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

        let mut lines: Vec<Line> = text_lines.into_iter().map(Line::from).collect();
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("[n]", Style::default().fg(Color::Cyan)),
            Span::raw(" Show as notification   "),
            Span::styled("[e]", Style::default().fg(Color::Cyan)),
            Span::raw(" Edit   "),
            Span::styled("[x]", Style::default().fg(FG_DANGER)),
            Span::raw(" Delete   "),
            Span::styled("[Esc]", Style::default().fg(Color::DarkGray)),
            Span::raw(" Close"),
        ]));
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_mail_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(Overlay::Mail(uri)) = &self.overlay else {
            return;
        };
        let width = min(area.width.saturating_sub(10), 90);
        let height = min(area.height.saturating_sub(4), 12);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("✉️ Email Backup"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let lines = vec![
            Line::from(Span::styled(
                "Open this link with your mail client:",
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(Span::styled(uri.clone(), Style::default().fg(FG_ACCENT))),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 80);
        let height = min(
            u16::try_from(lines.len()).unwrap_or(u16::MAX) + 4,
            area.height.saturating_sub(2),
        )
        .max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard & Mouse"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(format!("{:<16}", combo), Style::default().fg(Color::Cyan)),
                    Span::raw(desc),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
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

        let task = self
            .store
            .ui()
            .task_to_delete
            .as_deref()
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
                "Every task with this exact text is removed.",
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                format!("Delete '{}'?", task),
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
