//! Press-hold-drag reordering as an explicit state machine.
//!
//! The controller never looks at a screen. Callers hand it a [`Viewport`] describing the rows
//! that are currently visible (offsets and heights in the caller's units) and it answers with
//! cues, scroll requests and, on release, at most one [`ReorderIntent`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub index: usize,
    /// Top of the row relative to the list's content origin.
    pub offset: i32,
    pub size: i32,
}

impl VisibleRow {
    pub fn end(&self) -> i32 {
        self.offset + self.size
    }

    pub fn contains(&self, position: i32) -> bool {
        position >= self.offset && position < self.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub start: i32,
    pub end: i32,
    pub rows: Vec<VisibleRow>,
}

impl Viewport {
    pub fn new(start: i32, end: i32, rows: Vec<VisibleRow>) -> Self {
        Self { start, end, rows }
    }

    pub fn row(&self, index: usize) -> Option<&VisibleRow> {
        self.rows.iter().find(|row| row.index == index)
    }

    pub fn hit(&self, position: i32) -> Option<&VisibleRow> {
        self.rows.iter().find(|row| row.contains(position))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragConfig {
    /// Distance from either viewport edge that triggers auto-scroll.
    pub edge_margin: i32,
    pub scroll_step: i32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            edge_margin: 1,
            scroll_step: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Lifted,
    TargetMoved,
}

/// Signed scroll distance; negative scrolls toward the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub delta: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragUpdate {
    pub cue: Option<Cue>,
    pub scroll: Option<ScrollRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderIntent {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub dragged_index: usize,
    pub target_index: usize,
    pub drag_position: i32,
    pub touch_offset: i32,
}

impl DragSession {
    pub fn floating_offset(&self) -> i32 {
        self.drag_position - self.touch_offset
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureEnd {
    Released,
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    config: DragConfig,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            state: DragState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.session().map(|session| session.dragged_index)
    }

    pub fn target_index(&self) -> Option<usize> {
        self.session().map(|session| session.target_index)
    }

    /// Idle -> Dragging. Ignored when there is nothing to drag.
    pub fn begin(
        &mut self,
        index: usize,
        touch_offset: i32,
        viewport: &Viewport,
        len: usize,
    ) -> DragUpdate {
        if len == 0 || viewport.rows.is_empty() || index >= len {
            return DragUpdate::default();
        }

        if let DragState::Dragging(previous) = self.state {
            tracing::debug!(
                dragged = previous.dragged_index,
                "resetting unfinished drag before starting a new one"
            );
            self.state = DragState::Idle;
        }

        let drag_position = match viewport.row(index) {
            Some(row) => row.offset + touch_offset,
            None => touch_offset,
        };
        self.state = DragState::Dragging(DragSession {
            dragged_index: index,
            target_index: index,
            drag_position,
            touch_offset,
        });
        tracing::debug!(index, drag_position, "drag started");

        DragUpdate {
            cue: Some(Cue::Lifted),
            scroll: None,
        }
    }

    pub fn drag_by(&mut self, delta: i32, viewport: &Viewport, len: usize) -> DragUpdate {
        let config = self.config;
        let DragState::Dragging(session) = &mut self.state else {
            return DragUpdate::default();
        };
        if len == 0 {
            return DragUpdate::default();
        }

        session.drag_position += delta;
        let adjusted = session.drag_position - viewport.start;
        let candidate = locate_target(adjusted, &viewport.rows)
            .unwrap_or(session.dragged_index)
            .min(len - 1);

        let mut update = DragUpdate::default();
        if candidate != session.target_index && candidate != session.dragged_index {
            tracing::debug!(
                from = session.target_index,
                to = candidate,
                position = adjusted,
                "drag target changed"
            );
            session.target_index = candidate;
            update.cue = Some(Cue::TargetMoved);
        }

        if session.drag_position < viewport.start + config.edge_margin {
            update.scroll = Some(ScrollRequest {
                delta: -config.scroll_step,
            });
        } else if session.drag_position > viewport.end - config.edge_margin {
            update.scroll = Some(ScrollRequest {
                delta: config.scroll_step,
            });
        }

        update
    }

    pub fn release(&mut self) -> Option<ReorderIntent> {
        self.finish(GestureEnd::Released)
    }

    pub fn cancel(&mut self) -> Option<ReorderIntent> {
        self.finish(GestureEnd::Cancelled)
    }

    /// Drops an unfinished session without reporting a move.
    pub fn abandon(&mut self) {
        if let DragState::Dragging(session) = std::mem::take(&mut self.state) {
            tracing::debug!(dragged = session.dragged_index, "abandoned unfinished drag");
        }
    }

    fn finish(&mut self, end: GestureEnd) -> Option<ReorderIntent> {
        // State is already Idle when the result is evaluated.
        let snapshot = std::mem::take(&mut self.state);
        let DragState::Dragging(session) = snapshot else {
            return None;
        };

        let (from, to) = (session.dragged_index, session.target_index);
        tracing::debug!(from, to, ?end, "drag finished");
        (from != to).then_some(ReorderIntent { from, to })
    }
}

/// Scan visible rows for the one under `position`, clamping to the first or last visible row.
fn locate_target(position: i32, rows: &[VisibleRow]) -> Option<usize> {
    let last = rows.len().checked_sub(1)?;
    let mut candidate = None;
    for (i, row) in rows.iter().enumerate() {
        if position >= row.offset && position <= row.end() {
            return Some(row.index);
        }
        if position < row.offset {
            return Some(row.index);
        }
        if i == last {
            candidate = Some(row.index);
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn viewport(heights: &[i32], height: i32) -> Viewport {
        let mut offset = 0;
        let rows = heights
            .iter()
            .enumerate()
            .map(|(index, size)| {
                let row = VisibleRow {
                    index,
                    offset,
                    size: *size,
                };
                offset += size;
                row
            })
            .collect();
        Viewport::new(0, height, rows)
    }

    #[test]
    fn dragging_second_item_to_the_end() {
        let view = viewport(&[3, 3, 3, 3], 40);
        let mut controller = DragController::default();

        let update = controller.begin(1, 1, &view, 4);
        assert_eq!(update.cue, Some(Cue::Lifted));
        assert_eq!(controller.dragged_index(), Some(1));
        assert_eq!(controller.target_index(), Some(1));

        // position 4 -> 10, inside row 3 (offset 9..12)
        let update = controller.drag_by(6, &view, 4);
        assert_eq!(update.cue, Some(Cue::TargetMoved));
        assert_eq!(controller.target_index(), Some(3));

        let intent = controller.release();
        assert_eq!(intent, Some(ReorderIntent { from: 1, to: 3 }));
        assert_eq!(controller.state(), &DragState::Idle);

        let mut tasks = vec!["A", "B", "C", "D"];
        let item = tasks.remove(1);
        tasks.insert(3, item);
        assert_eq!(tasks, vec!["A", "C", "D", "B"]);
    }

    #[test]
    fn dragging_past_the_end_clamps_to_last_index() {
        let view = viewport(&[2, 2, 2], 40);
        let mut controller = DragController::default();
        controller.begin(0, 0, &view, 3);

        controller.drag_by(500, &view, 3);
        assert_eq!(controller.target_index(), Some(2));
        assert_eq!(controller.release(), Some(ReorderIntent { from: 0, to: 2 }));
    }

    #[test]
    fn clamps_to_list_length_when_rows_outnumber_tasks() {
        // layout still shows a stale fourth row while the list shrank to two tasks
        let view = viewport(&[2, 2, 2, 2], 40);
        let mut controller = DragController::default();
        controller.begin(0, 0, &view, 2);
        controller.drag_by(7, &view, 2);
        assert_eq!(controller.target_index(), Some(1));
    }

    #[test]
    fn position_above_first_visible_row_picks_it() {
        let rows = vec![
            VisibleRow {
                index: 5,
                offset: 2,
                size: 2,
            },
            VisibleRow {
                index: 6,
                offset: 4,
                size: 2,
            },
        ];
        let view = Viewport::new(0, 20, rows);
        let mut controller = DragController::default();
        controller.begin(6, 0, &view, 10);
        controller.drag_by(-4, &view, 10);
        assert_eq!(controller.target_index(), Some(5));
    }

    #[test]
    fn starting_a_second_drag_resets_the_first() {
        let view = viewport(&[2, 2, 2, 2], 20);
        let mut controller = DragController::default();
        controller.begin(0, 0, &view, 4);
        controller.drag_by(5, &view, 4);
        assert_eq!(controller.target_index(), Some(2));

        controller.begin(2, 0, &view, 4);
        assert_eq!(controller.dragged_index(), Some(2));
        assert_eq!(controller.target_index(), Some(2));
        assert_eq!(controller.release(), None);
    }

    #[test]
    fn abandon_drops_the_session_without_a_move() {
        let view = viewport(&[2, 2, 2, 2], 20);
        let mut controller = DragController::default();
        controller.begin(0, 0, &view, 4);
        controller.drag_by(5, &view, 4);

        controller.abandon();
        assert!(!controller.is_dragging());
        assert_eq!(controller.cancel(), None);
    }

    #[test]
    fn empty_list_disables_the_gesture() {
        let mut controller = DragController::default();
        let update = controller.begin(0, 0, &Viewport::new(0, 10, vec![]), 0);
        assert_eq!(update, DragUpdate::default());
        assert!(!controller.is_dragging());
        assert_eq!(controller.drag_by(3, &Viewport::default(), 0), DragUpdate::default());
        assert_eq!(controller.release(), None);
    }

    #[test]
    fn cancel_returns_to_idle_and_still_reports_the_move() {
        let view = viewport(&[1, 1, 1], 20);
        let mut controller = DragController::default();
        controller.begin(2, 0, &view, 3);
        controller.drag_by(-2, &view, 3);

        assert_eq!(controller.cancel(), Some(ReorderIntent { from: 2, to: 0 }));
        assert!(!controller.is_dragging());
        assert_eq!(controller.cancel(), None);
    }

    #[test]
    fn returning_over_the_lifted_row_keeps_previous_target() {
        let view = viewport(&[2, 2, 2], 20);
        let mut controller = DragController::default();
        controller.begin(1, 0, &view, 3);
        controller.drag_by(3, &view, 3);
        assert_eq!(controller.target_index(), Some(2));

        let update = controller.drag_by(-2, &view, 3);
        assert_eq!(update.cue, None);
        assert_eq!(controller.target_index(), Some(2));
    }

    #[test]
    fn no_cue_when_target_is_unchanged() {
        let view = viewport(&[4, 4], 20);
        let mut controller = DragController::default();
        controller.begin(0, 0, &view, 2);
        assert_eq!(controller.drag_by(5, &view, 2).cue, Some(Cue::TargetMoved));
        assert_eq!(controller.drag_by(1, &view, 2).cue, None);
    }

    #[rstest]
    #[case(0, Some(-1))]
    #[case(5, None)]
    #[case(10, Some(1))]
    fn auto_scroll_near_edges(#[case] touch: i32, #[case] expected: Option<i32>) {
        let view = viewport(&[10], 10);
        let mut controller = DragController::new(DragConfig {
            edge_margin: 1,
            scroll_step: 1,
        });
        controller.begin(0, touch, &view, 1);
        let update = controller.drag_by(0, &view, 1);
        assert_eq!(update.scroll.map(|s| s.delta), expected);
    }

    #[test]
    fn floating_offset_tracks_pointer() {
        let view = viewport(&[3, 3], 20);
        let mut controller = DragController::default();
        controller.begin(1, 2, &view, 2);
        controller.drag_by(-1, &view, 2);
        let session = controller.session().expect("dragging");
        assert_eq!(session.drag_position, 4);
        assert_eq!(session.floating_offset(), 2);
    }
}
