use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const BG_BASE: Color = Color::Rgb(27, 39, 65);
pub const BG_PANEL: Color = Color::Rgb(22, 31, 52);
pub const BG_ACCENT: Color = Color::Rgb(2, 66, 150);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);
pub const FG_DANGER: Color = Color::Rgb(255, 82, 82);
pub const BG_TAB_IDLE: Color = Color::Rgb(42, 42, 42);

/// Alternating row backgrounds, even rows first.
pub const ROW_COLORS: [Color; 2] = [Color::Rgb(29, 57, 134), Color::Rgb(62, 91, 190)];

pub fn row_color(index: usize) -> Color {
    ROW_COLORS[index % ROW_COLORS.len()]
}

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

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab / Shift+Tab", "Next / previous category"),
        ("← / → or 1-3", "Switch category"),
        ("j / k or ↓ / ↑", "Move selection"),
        ("J / K", "Move selected task down / up"),
        ("Enter", "Task details (show as notification)"),
        ("a", "Add a task"),
        ("e", "Edit selected task"),
        ("x / Delete", "Delete task (with confirmation)"),
        ("s", "Export category to a file"),
        ("o", "Import category from a file"),
        ("m", "Email the category as a backup"),
        ("h", "Toggle this help overlay"),
        ("q / Ctrl+C", "Quit"),
        ("Click", "Open task details, ✖ deletes"),
        ("Press + drag", "Reorder; drag near an edge to scroll"),
        ("Wheel", "Scroll the list"),
        ("Esc", "Cancel/close overlays"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}
