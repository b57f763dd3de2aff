use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Category;
use crate::tui::buffer::TextBuffer;

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    EnterEdit,
    ShowDetails,
    ShowHelp,
    Delete,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    MoveDown,
    MoveUp,
    PrevTab,
    NextTab,
    JumpTab(Category),
    Export,
    Import,
    Email,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('e') => Some(Self::EnterEdit),
            KeyCode::Char('h') => Some(Self::ShowHelp),
            KeyCode::Char('s') => Some(Self::Export),
            KeyCode::Char('o') => Some(Self::Import),
            KeyCode::Char('m') => Some(Self::Email),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('J') => Some(Self::MoveDown),
            KeyCode::Char('K') => Some(Self::MoveUp),
            KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => Some(Self::MoveDown),
            KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => Some(Self::MoveUp),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Left | KeyCode::BackTab => Some(Self::PrevTab),
            KeyCode::Right | KeyCode::Tab => Some(Self::NextTab),
            KeyCode::Char(digit @ '1'..='3') => {
                let id = digit.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
                Category::from_id(id - 1).map(Self::JumpTab)
            }
            KeyCode::Enter => Some(Self::ShowDetails),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

/// Line-editing keys shared by the composer and the path prompts. Returns whether `key` was used.
fn edit_line(buffer: &mut TextBuffer, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => buffer.insert_char(c),
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete_char(),
        KeyCode::Left => buffer.move_left(),
        KeyCode::Right => buffer.move_right(),
        KeyCode::Home => buffer.move_home(),
        KeyCode::End => buffer.move_end(),
        _ => return false,
    }
    true
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        if self.drag.is_dragging() {
            if key.code == KeyCode::Esc {
                self.cancel_drag();
            }
            return;
        }

        match self.input_mode() {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Compose => self.handle_compose_mode(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
            InputMode::Details => self.handle_details_mode(key),
            InputMode::ExportPath | InputMode::ImportPath => self.handle_path_mode(key),
            InputMode::Mail | InputMode::Help => self.handle_dismiss_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        let has_tasks = !self.store.current_tasks().is_empty();
        match action {
            NormalAction::Quit => {
                self.should_quit = true;
            }
            NormalAction::EnterAdd => self.begin_add(),
            NormalAction::EnterEdit => self.begin_edit(self.selected),
            NormalAction::ShowDetails => self.open_details(self.selected),
            NormalAction::ShowHelp => self.show_help_overlay(),
            NormalAction::Delete => self.prompt_delete(self.selected),
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => self.select_first(),
            NormalAction::SelectLast => self.select_last(),
            NormalAction::MoveDown if has_tasks => self.move_selected(1),
            NormalAction::MoveUp if has_tasks => self.move_selected(-1),
            NormalAction::MoveDown | NormalAction::MoveUp => {
                self.set_status_info("Nothing to move");
            }
            NormalAction::PrevTab => self.select_category(self.category().prev()),
            NormalAction::NextTab => self.select_category(self.category().next()),
            NormalAction::JumpTab(category) => self.select_category(category),
            NormalAction::Export => self.begin_export(),
            NormalAction::Import => self.begin_import(),
            NormalAction::Email => self.open_mail(),
        }
    }

    fn handle_compose_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_composer(),
            KeyCode::Esc => self.cancel_composer(),
            _ => {
                if edit_line(&mut self.input, &key) {
                    self.sync_composer();
                }
            }
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.cancel_delete(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Char('y') => self.confirm_delete(),
            KeyCode::Char('n') => self.cancel_delete(),
            KeyCode::Enter => {
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.confirm_delete();
                } else {
                    self.cancel_delete();
                }
            }
            _ => {}
        }
    }

    fn handle_details_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.close_details(),
            KeyCode::Char('n') => self.notify_selected(),
            KeyCode::Char('e') => self.begin_edit(self.selected),
            KeyCode::Char('x') | KeyCode::Delete => self.prompt_delete(self.selected),
            _ => {}
        }
    }

    fn handle_path_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_overlay(),
            KeyCode::Enter if self.input_mode() == InputMode::ExportPath => self.submit_export(),
            KeyCode::Enter => self.submit_import(),
            _ => {
                edit_line(&mut self.path_input, &key);
            }
        }
    }

    fn handle_dismiss_mode(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.close_overlay();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[rstest]
    #[case(key(KeyCode::Char('1')), Some(NormalAction::JumpTab(Category::Personal)))]
    #[case(key(KeyCode::Char('3')), Some(NormalAction::JumpTab(Category::Other)))]
    #[case(key(KeyCode::Char('4')), None)]
    #[case(key(KeyCode::Char('J')), Some(NormalAction::MoveDown))]
    #[case(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT), Some(NormalAction::MoveUp))]
    #[case(key(KeyCode::Up), Some(NormalAction::SelectPrev))]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(NormalAction::Quit))]
    fn maps_keys_to_actions(#[case] event: KeyEvent, #[case] expected: Option<NormalAction>) {
        assert_eq!(NormalAction::from_event(&event), expected);
    }
}
