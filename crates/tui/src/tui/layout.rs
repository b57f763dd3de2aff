use todolist_core::{Viewport, VisibleRow};

use super::constants::{DELETE_ZONE_WIDTH, MARKER_WIDTH};

/// Blank line drawn under every row.
pub(crate) const ROW_GAP: usize = 1;

/// Columns left for task text once the marker and the delete zone are taken out.
pub(crate) fn text_width(list_width: u16) -> usize {
    usize::from(list_width.saturating_sub(MARKER_WIDTH + DELETE_ZONE_WIDTH)).max(1)
}

/// Hard-wrap `text` at `width` characters. Stored line breaks start a new line.
pub(crate) fn wrap_task(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let chars: Vec<char> = segment.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}

pub(crate) fn row_height(text: &str, list_width: u16) -> usize {
    wrap_task(text, text_width(list_width)).len() + ROW_GAP
}

/// Rows visible in a list area of `width` x `height`, starting at row `scroll`.
///
/// The last row may extend past `height`; it is clipped when drawn.
pub(crate) fn layout_rows(
    tasks: &[String],
    width: u16,
    scroll: usize,
    height: u16,
) -> Vec<VisibleRow> {
    let limit = i32::from(height);
    let mut rows = Vec::new();
    let mut offset = 0i32;
    for (index, task) in tasks.iter().enumerate().skip(scroll) {
        if offset >= limit {
            break;
        }
        let size = i32::try_from(row_height(task, width)).unwrap_or(i32::MAX);
        rows.push(VisibleRow {
            index,
            offset,
            size,
        });
        offset = offset.saturating_add(size);
    }
    rows
}

pub(crate) fn viewport(tasks: &[String], width: u16, scroll: usize, height: u16) -> Viewport {
    Viewport::new(
        0,
        i32::from(height),
        layout_rows(tasks, width, scroll, height),
    )
}
