use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::constants::DELETE_ZONE_WIDTH;
use crate::tui::helpers::contains;

use super::{App, InputMode};

/// A left press on a row that has not turned into a drag yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PointerPress {
    pub(super) index: usize,
    /// Pointer distance from the top of the pressed row.
    pub(super) touch_offset: i32,
    pub(super) last_y: i32,
    pub(super) started: bool,
}

impl App {
    pub(crate) fn on_mouse(&mut self, event: MouseEvent) {
        if self.input_mode() != InputMode::Normal {
            return;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(event.column, event.row),
            MouseEventKind::Drag(MouseButton::Left) => self.pointer_drag(event.row),
            MouseEventKind::Up(MouseButton::Left) => self.pointer_up(event.row),
            MouseEventKind::ScrollDown if !self.drag.is_dragging() => self.scroll_by(1),
            MouseEventKind::ScrollUp if !self.drag.is_dragging() => self.scroll_by(-1),
            _ => {}
        }
    }

    /// Row position relative to the top of the list content.
    fn list_y(&self, row: u16) -> i32 {
        i32::from(row) - i32::from(self.list_area.y)
    }

    fn pointer_down(&mut self, column: u16, row: u16) {
        // a press while still dragging means the previous release never arrived
        if self.drag.is_dragging() {
            self.drag.abandon();
        }
        self.press = None;

        if let Some(category) = self
            .tab_hits
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, category)| *category)
        {
            self.select_category(category);
            return;
        }

        if !contains(self.list_area, column, row) {
            return;
        }
        let y = self.list_y(row);
        let Some(hit) = self.viewport().hit(y).copied() else {
            return;
        };

        let delete_zone = self.list_area.right().saturating_sub(DELETE_ZONE_WIDTH);
        if column >= delete_zone {
            self.prompt_delete(hit.index);
            return;
        }

        self.selected = hit.index;
        self.press = Some(PointerPress {
            index: hit.index,
            touch_offset: y - hit.offset,
            last_y: y,
            started: false,
        });
    }

    fn pointer_drag(&mut self, row: u16) {
        let Some(mut press) = self.press else {
            return;
        };
        let len = self.store.current_tasks().len();
        if !press.started {
            press.started = true;
            let viewport = self.viewport();
            let update = self
                .drag
                .begin(press.index, press.touch_offset, &viewport, len);
            self.apply_drag_update(update);
        }

        let y = self.list_y(row);
        let delta = y - press.last_y;
        press.last_y = y;
        self.press = Some(press);
        let viewport = self.viewport();
        let update = self.drag.drag_by(delta, &viewport, len);
        self.apply_drag_update(update);
    }

    fn pointer_up(&mut self, row: u16) {
        let Some(press) = self.press.take() else {
            return;
        };
        if press.started {
            let intent = self.drag.release();
            self.finish_drag(intent);
            return;
        }

        // press and release on the same row is a click
        let y = self.list_y(row);
        if self.viewport().hit(y).map(|hit| hit.index) == Some(press.index) {
            self.open_details(press.index);
        }
    }
}
