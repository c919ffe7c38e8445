use crate::{
    editor::buffer::{EditBuffer, Editor},
    registry::store::RegistryStore,
};
use common::machine::Registry;
use common::server::{capabilities::Capabilities, push::PushEvent};
use crossterm::event::KeyCode;

/// Generic message for any login failure; the real cause goes to the log.
const LOGIN_FAILED: &str = "Invalid account or password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Account,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub account: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    pub pending: bool,
}

impl LoginForm {
    fn new() -> LoginForm {
        LoginForm {
            account: String::new(),
            password: String::new(),
            focus: LoginField::Account,
            error: None,
            pending: false,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Account => &mut self.account,
            LoginField::Password => &mut self.password,
        }
    }
}

/// A user action that needs the network. Produced by key handling,
/// executed by a spawned task so the view never blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SubmitLogin { account: String, password: String },
    SaveRow(String),
    UpdateRow { id: String, buffer: EditBuffer },
    DeleteRow(String),
}

pub struct App {
    pub view: View,
    pub login: LoginForm,
    pub session: Option<String>,
    pub store: RegistryStore,
    pub editor: Editor,
    pub selected: usize,
    /// Blocking failure alert. While set, all other input is ignored.
    pub alert: Option<String>,
    /// Machine id awaiting delete confirmation.
    pub confirm_delete: Option<String>,
    pub capabilities: Capabilities,
    pub should_quit: bool,
}

impl App {
    pub fn new(capabilities: Capabilities) -> App {
        App {
            view: View::Login,
            login: LoginForm::new(),
            session: None,
            store: RegistryStore::new(),
            editor: Editor::new(),
            selected: 0,
            alert: None,
            confirm_delete: None,
            capabilities,
            should_quit: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.view == View::Dashboard
    }

    /// Fold a push event into the store. Rows can disappear with a
    /// snapshot, so the selection is clamped afterwards.
    pub fn apply_push(&mut self, event: PushEvent) {
        self.store.apply(event);
        self.clamp_selection();
    }

    pub fn seed_registry(&mut self, snapshot: Registry) {
        self.store.seed(snapshot);
        self.clamp_selection();
    }

    pub fn finish_login(&mut self, token: String) {
        self.session = Some(token);
        self.login.pending = false;
        self.login.error = None;
        self.view = View::Dashboard;
    }

    pub fn fail_login(&mut self) {
        self.login.pending = false;
        self.login.password.clear();
        self.login.error = Some(LOGIN_FAILED.to_string());
    }

    pub fn raise_alert(&mut self, message: String) {
        self.alert = Some(message);
    }

    /// The machine id of the selected table row.
    pub fn selected_id(&self) -> Option<String> {
        self.store.registry().keys().nth(self.selected).cloned()
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<Action> {
        if self.alert.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return None;
        }

        match self.view {
            View::Login => self.handle_login_key(code),
            View::Dashboard => self.handle_dashboard_key(code),
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.focus = match self.login.focus {
                    LoginField::Account => LoginField::Password,
                    LoginField::Password => LoginField::Account,
                };
            }
            KeyCode::Char(value) => self.login.focused_mut().push(value),
            KeyCode::Backspace => {
                self.login.focused_mut().pop();
            }
            KeyCode::Enter => {
                if !self.login.pending {
                    self.login.pending = true;
                    return Some(Action::SubmitLogin {
                        account: self.login.account.clone(),
                        password: self.login.password.clone(),
                    });
                }
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
        None
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) -> Option<Action> {
        if let Some(id) = self.confirm_delete.clone() {
            match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.confirm_delete = None;
                    return Some(Action::DeleteRow(id));
                }
                // Declining is a no-op, not an error.
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_delete = None;
                }
                _ => {}
            }
            return None;
        }

        if self.editor.is_active() {
            return self.handle_edit_key(code);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    if let Some(record) = self.store.registry().get(&id) {
                        self.editor.begin(&id, record);
                    }
                }
            }
            KeyCode::Char('s') => {
                if self.capabilities.save {
                    return self.selected_id().map(Action::SaveRow);
                }
            }
            KeyCode::Char('d') => {
                if self.capabilities.delete {
                    self.confirm_delete = self.selected_id();
                }
            }
            _ => {}
        }
        None
    }

    fn handle_edit_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Esc => self.editor.cancel(),
            KeyCode::Tab => self.editor.next_field(),
            KeyCode::BackTab => self.editor.prev_field(),
            KeyCode::Up => self.editor.cycle_platform(-1),
            KeyCode::Down => self.editor.cycle_platform(1),
            KeyCode::Char(value) => self.editor.push_char(value),
            KeyCode::Backspace => self.editor.pop_char(),
            KeyCode::Enter => {
                return self
                    .editor
                    .commit_payload()
                    .map(|(id, buffer)| Action::UpdateRow { id, buffer });
            }
            _ => {}
        }
        None
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        let count = self.store.registry().len();
        if count != 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.store.registry().len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }
}
