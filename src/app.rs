use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::{ACTION_BAR, Action, hotkey_action};
use crate::db::ProcedureExecutor;
use crate::dispatcher::{Dispatcher, FormController, Notice, PendingDelete, Triggered};
use crate::form::Form;
use crate::schema::ENTITIES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    Button(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Notice(Notice),
    ConfirmDelete(PendingDelete),
}

/// Application context: the five forms, which one is showing, and the modal
/// dialog on top, if any.
pub struct App<X> {
    dispatcher: Dispatcher<X>,
    pub forms: Vec<Form>,
    pub active: usize,
    pub focus: Focus,
    pub dialog: Option<Dialog>,
    queued: VecDeque<Notice>,
    pub should_quit: bool,
}

impl<X: ProcedureExecutor> App<X> {
    pub fn new(dispatcher: Dispatcher<X>) -> Self {
        Self {
            dispatcher,
            forms: ENTITIES.into_iter().map(Form::new).collect(),
            active: 0,
            focus: Focus::Field(0),
            dialog: None,
            queued: VecDeque::new(),
            should_quit: false,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<X> {
        &self.dispatcher
    }

    pub fn form(&self) -> &Form {
        &self.forms[self.active]
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.forms[self.active]
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.dialog.is_some() {
            self.handle_dialog_key(key);
            return;
        }

        if let Some(action) = hotkey_action(&key) {
            self.press(action);
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::PageDown => self.select_tab((self.active + 1) % self.forms.len()),
            KeyCode::PageUp => {
                self.select_tab((self.active + self.forms.len() - 1) % self.forms.len())
            }
            KeyCode::F(n) if (1..=self.forms.len()).contains(&(n as usize)) => {
                self.select_tab(n as usize - 1)
            }
            _ => match self.focus {
                Focus::Button(i) => self.handle_button_key(i, key),
                Focus::Field(i) => {
                    if key.code == KeyCode::Enter {
                        self.focus_next();
                    } else {
                        self.form_mut().inputs[i].handle_key(key);
                    }
                }
            },
        }
    }

    fn handle_button_key(&mut self, index: usize, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.press(ACTION_BAR[index].action),
            KeyCode::Left if index > 0 => self.focus = Focus::Button(index - 1),
            KeyCode::Right if index + 1 < ACTION_BAR.len() => {
                self.focus = Focus::Button(index + 1)
            }
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        match dialog {
            Dialog::Notice(notice) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => self.show_next(),
                _ => self.dialog = Some(Dialog::Notice(notice)),
            },
            Dialog::ConfirmDelete(pending) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    let mut notices = Vec::new();
                    self.dispatcher.execute_delete(pending, &mut notices);
                    self.enqueue(notices);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    log::info!("{} of id {:?} cancelled", pending.procedure, pending.id);
                    self.show_next();
                }
                _ => self.dialog = Some(Dialog::ConfirmDelete(pending)),
            },
        }
    }

    /// Same as clicking the button on the active tab.
    pub fn press(&mut self, action: Action) {
        let mut notices = Vec::new();
        let form = &mut self.forms[self.active];
        let controller = FormController::new(form.entity, &self.dispatcher);

        match controller.trigger(action, form, &mut notices) {
            Triggered::Done(outcome) => {
                log::debug!("{:?} on {} -> {:?}", action, form.entity.tab, outcome);
            }
            Triggered::AwaitingConfirmation(pending) => {
                self.dialog = Some(Dialog::ConfirmDelete(pending));
            }
        }
        self.enqueue(notices);
    }

    fn enqueue(&mut self, notices: Vec<Notice>) {
        self.queued.extend(notices);
        if self.dialog.is_none() {
            self.show_next();
        }
    }

    fn show_next(&mut self) {
        self.dialog = self.queued.pop_front().map(Dialog::Notice);
    }

    pub fn select_tab(&mut self, index: usize) {
        self.active = index;
        self.focus = Focus::Field(0);
    }

    fn focus_next(&mut self) {
        let fields = self.form().inputs.len();
        self.focus = match self.focus {
            Focus::Field(i) if i + 1 < fields => Focus::Field(i + 1),
            Focus::Field(_) => Focus::Button(0),
            Focus::Button(i) if i + 1 < ACTION_BAR.len() => Focus::Button(i + 1),
            Focus::Button(_) => Focus::Field(0),
        };
    }

    fn focus_prev(&mut self) {
        let fields = self.form().inputs.len();
        self.focus = match self.focus {
            Focus::Field(0) => Focus::Button(ACTION_BAR.len() - 1),
            Focus::Field(i) => Focus::Field(i - 1),
            Focus::Button(0) => Focus::Field(fields - 1),
            Focus::Button(i) => Focus::Button(i - 1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MSG_ALL_REQUIRED, MSG_DELETED, MSG_SAVED, MSG_VALID_ID};
    use crate::dispatcher::Level;
    use crate::dispatcher::tests::Recorder;
    use crate::form::FormInputs;

    fn app() -> App<Recorder> {
        App::new(Dispatcher::new(Recorder::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App<Recorder>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn call_count(app: &App<Recorder>) -> usize {
        app.dispatcher().executor().calls.borrow().len()
    }

    fn notice(app: &App<Recorder>) -> &Notice {
        match &app.dialog {
            Some(Dialog::Notice(n)) => n,
            other => panic!("expected a notice, got {other:?}"),
        }
    }

    #[test]
    fn starts_on_genres_with_five_tabs() {
        let app = app();
        let tabs: Vec<_> = app.forms.iter().map(|f| f.entity.tab).collect();
        assert_eq!(tabs, vec!["Genres", "Customers", "Games", "Sales", "SaleDetails"]);
        assert_eq!(app.active, 0);
        assert_eq!(app.focus, Focus::Field(0));
    }

    #[test]
    fn tab_switching_wraps_and_resets_focus() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.active, 4);
        assert_eq!(app.focus, Focus::Field(0));
        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.active, 0);
        app.handle_key(key(KeyCode::F(3)));
        assert_eq!(app.form().entity.tab, "Games");
        app.handle_key(key(KeyCode::F(9)));
        assert_eq!(app.active, 2);
    }

    #[test]
    fn focus_walks_fields_then_buttons() {
        let mut app = app();
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(app.focus, Focus::Button(0));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.focus, Focus::Button(3));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Field(0));
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Button(3));
    }

    #[test]
    fn save_from_keyboard_then_dismiss() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "RPG");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Role-playing");
        app.handle_key(ctrl('s'));

        let calls = app.dispatcher().executor().calls.borrow().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "sp_InsertGenre");
        assert_eq!(calls[0].1, vec!["RPG".to_string(), "Role-playing".to_string()]);
        assert_eq!(notice(&app).message, MSG_SAVED);
        assert!(app.form().is_empty());

        // other keys are swallowed while the dialog is up
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.dialog.is_some());
        assert!(app.form().is_empty());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.dialog, None);
    }

    #[test]
    fn save_with_blank_field_shows_warning_only() {
        let mut app = app();
        app.handle_key(ctrl('s'));
        assert_eq!(call_count(&app), 0);
        assert_eq!(notice(&app).level, Level::Warning);
        assert_eq!(notice(&app).message, MSG_ALL_REQUIRED);
    }

    #[test]
    fn delete_button_asks_first() {
        let mut app = app();
        app.select_tab(2);
        app.form_mut().set("GameID", "3");
        app.focus = Focus::Button(2);
        app.handle_key(key(KeyCode::Enter));

        assert!(matches!(app.dialog, Some(Dialog::ConfirmDelete(_))));
        assert_eq!(call_count(&app), 0);

        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(call_count(&app), 1);
        assert_eq!(notice(&app).message, MSG_DELETED);
        assert_eq!(app.form().value("GameID"), Some("3"));
    }

    #[test]
    fn declined_delete_closes_silently() {
        let mut app = app();
        app.form_mut().set("GenreID", "1");
        app.handle_key(ctrl('d'));
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.dialog, None);
        assert_eq!(call_count(&app), 0);
    }

    #[test]
    fn blank_delete_warns_without_confirmation() {
        let mut app = app();
        app.handle_key(ctrl('d'));
        assert_eq!(notice(&app).message, MSG_VALID_ID);
        assert_eq!(call_count(&app), 0);
    }

    #[test]
    fn failed_delete_shows_error() {
        let mut app = app();
        app.dispatcher().executor().fail.set(true);
        app.form_mut().set("GenreID", "1");
        app.handle_key(ctrl('d'));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(call_count(&app), 1);
        assert_eq!(notice(&app).level, Level::Error);
    }

    #[test]
    fn clear_hotkey_empties_form() {
        let mut app = app();
        type_text(&mut app, "12");
        assert!(!app.form().is_empty());
        app.handle_key(ctrl('l'));
        assert!(app.form().is_empty());
        assert_eq!(app.dialog, None);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = self::app();
        app.handle_key(ctrl('d'));
        app.handle_key(ctrl('q'));
        assert!(app.should_quit);
    }
}
