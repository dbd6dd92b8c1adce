//! Application state and transitions
//!
//! All UI state lives in one `App` value owned by the run loop and passed
//! by reference to the render functions. `handle_key` maps key events to
//! state changes and optional `Effect`s (the network actions the run loop
//! executes), so every transition is testable without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::types::{
    ContentDocument, ContentListResponse, ContentSummary, ContentType, GitStatusItem,
    GitStatusResponse, PublishResponse,
};
use crate::content::form::EditorForm;
use crate::tui::input::{Input, TextArea};

/// Which of the three logged-in views is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Editor,
    Publish,
}

/// Pending delete confirmation. Two sequential confirmations are required
/// before the destructive call is issued; declining either aborts with no
/// side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    None,
    DeleteFile,
    DeleteForever,
}

/// Input focus on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    List,
    Search,
}

/// Input focus in the editor form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Kind,
    Title,
    Date,
    Categories,
    Link,
    Comment,
    Draft,
    Body,
}

/// Editor view state: one `Input` per form field, bridged to the domain
/// `EditorForm` for validation and payload building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub id: Option<String>,
    pub kind: ContentType,
    pub draft: bool,
    pub title: Input,
    pub date: Input,
    pub categories: Input,
    pub link: Input,
    pub comment: Input,
    pub body: TextArea,
    pub field: EditorField,
}

impl EditorState {
    pub fn from_form(form: &EditorForm) -> Self {
        Self {
            id: form.id.clone(),
            kind: form.kind,
            draft: form.draft,
            title: Input::new(form.title.clone()),
            date: Input::new(form.date.clone()),
            categories: Input::new(form.categories.clone()),
            link: Input::new(form.link.clone()),
            comment: Input::new(form.comment.clone()),
            body: TextArea::new(&form.body),
            field: EditorField::Title,
        }
    }

    pub fn to_form(&self) -> EditorForm {
        EditorForm {
            id: self.id.clone(),
            kind: self.kind,
            title: self.title.value().to_string(),
            date: self.date.value().to_string(),
            categories: self.categories.value().to_string(),
            draft: self.draft,
            link: self.link.value().to_string(),
            comment: self.comment.value().to_string(),
            body: self.body.text(),
        }
    }

    pub fn focused_input(&mut self) -> Option<&mut Input> {
        match self.field {
            EditorField::Title => Some(&mut self.title),
            EditorField::Date => Some(&mut self.date),
            EditorField::Categories => Some(&mut self.categories),
            EditorField::Link => Some(&mut self.link),
            EditorField::Comment => Some(&mut self.comment),
            EditorField::Kind | EditorField::Draft | EditorField::Body => None,
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            EditorField::Kind => EditorField::Title,
            EditorField::Title => EditorField::Date,
            EditorField::Date => EditorField::Categories,
            EditorField::Categories => EditorField::Link,
            EditorField::Link => EditorField::Comment,
            EditorField::Comment => EditorField::Draft,
            EditorField::Draft => EditorField::Body,
            EditorField::Body => EditorField::Kind,
        };
    }

    pub fn prev_field(&mut self) {
        self.field = match self.field {
            EditorField::Kind => EditorField::Body,
            EditorField::Title => EditorField::Kind,
            EditorField::Date => EditorField::Title,
            EditorField::Categories => EditorField::Date,
            EditorField::Link => EditorField::Categories,
            EditorField::Comment => EditorField::Link,
            EditorField::Draft => EditorField::Comment,
            EditorField::Body => EditorField::Draft,
        };
    }
}

/// A network action requested by a key transition; the run loop executes
/// it and feeds the result back into the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Login { password: String },
    Logout,
    RefreshList,
    RefreshGitStatus,
    Open { id: String },
    Save,
    Delete { id: String },
    Publish { message: String },
    Quit,
}

/// The whole application state
pub struct App {
    pub logged_in: bool,
    pub screen: Screen,
    pub active_type: ContentType,
    pub today: String,
    pub password: Input,
    pub auth_error: Option<String>,
    pub query: Input,
    pub dashboard_focus: DashboardFocus,
    pub items: Vec<ContentSummary>,
    pub selected: usize,
    pub editor: EditorState,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub publish_message: Input,
    pub message_focused: bool,
    pub git_files: Vec<GitStatusItem>,
    pub publish_result: Option<PublishResponse>,
    pub confirm: Confirm,
}

impl App {
    pub fn new(today: String) -> Self {
        let editor = EditorState::from_form(&EditorForm::empty(ContentType::Note, &today));
        Self {
            logged_in: false,
            screen: Screen::Dashboard,
            active_type: ContentType::Note,
            password: Input::default(),
            auth_error: None,
            query: Input::default(),
            dashboard_focus: DashboardFocus::List,
            items: Vec::new(),
            selected: 0,
            editor,
            status_message: None,
            error_message: None,
            publish_message: Input::default(),
            message_focused: false,
            git_files: Vec::new(),
            publish_result: None,
            confirm: Confirm::None,
            today,
        }
    }

    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// Publish is only actionable while the last observed git status has
    /// pending files.
    pub fn can_publish(&self) -> bool {
        !self.git_files.is_empty()
    }

    pub fn selected_item(&self) -> Option<&ContentSummary> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// A confirmed session (startup probe or login success).
    pub fn apply_login(&mut self) {
        self.logged_in = true;
        self.screen = Screen::Dashboard;
        self.password.clear();
        self.auth_error = None;
    }

    /// Local session termination: back to a fresh logged-out state.
    pub fn apply_logout(&mut self) {
        *self = App::new(self.today.clone());
    }

    pub fn apply_list(&mut self, response: ContentListResponse) {
        self.items = response.items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn apply_git_status(&mut self, response: GitStatusResponse) {
        self.git_files = response.files;
    }

    /// Populate the editor from a fetched document and switch to it.
    pub fn open_document(&mut self, document: &ContentDocument) {
        let form = EditorForm::from_document(document, &self.today);
        self.editor = EditorState::from_form(&form);
        self.screen = Screen::Editor;
        self.clear_messages();
    }

    /// Fresh editor tagged with the active content type.
    pub fn new_document(&mut self) {
        let form = EditorForm::empty(self.active_type, &self.today);
        self.editor = EditorState::from_form(&form);
        self.screen = Screen::Editor;
        self.clear_messages();
    }

    /// A save round-trip succeeded; adopt the server-assigned identity.
    pub fn apply_saved(&mut self, document: &ContentDocument) {
        self.editor.id = Some(document.id.clone());
        self.editor.kind = document.kind;
        self.status_message = Some("Content saved.".to_string());
    }

    pub fn apply_deleted(&mut self) {
        let form = EditorForm::empty(self.active_type, &self.today);
        self.editor = EditorState::from_form(&form);
        self.screen = Screen::Dashboard;
        self.status_message = Some("Content deleted.".to_string());
    }

    pub fn apply_published(&mut self, result: PublishResponse) {
        self.publish_result = Some(result);
        self.publish_message.clear();
        self.status_message = Some("Publish completed.".to_string());
    }
}

/// Map one key event to state changes and an optional effect.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Effect::Quit);
    }
    if !app.logged_in {
        return login_key(app, key);
    }
    if app.confirm != Confirm::None {
        return confirm_key(app, key);
    }
    match app.screen {
        Screen::Dashboard => dashboard_key(app, key),
        Screen::Editor => editor_key(app, key),
        Screen::Publish => publish_key(app, key),
    }
}

fn login_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    match key.code {
        KeyCode::Enter => {
            let password = app.password.value().to_string();
            if password.is_empty() {
                None
            } else {
                app.auth_error = None;
                Some(Effect::Login { password })
            }
        }
        KeyCode::Esc => Some(Effect::Quit),
        _ => {
            app.password.handle_key(key);
            None
        }
    }
}

fn confirm_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => match app.confirm {
            Confirm::DeleteFile => {
                app.confirm = Confirm::DeleteForever;
                None
            }
            Confirm::DeleteForever => {
                app.confirm = Confirm::None;
                app.clear_messages();
                app.editor.id.clone().map(|id| Effect::Delete { id })
            }
            Confirm::None => None,
        },
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.confirm = Confirm::None;
            None
        }
        _ => None,
    }
}

fn dashboard_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if app.dashboard_focus == DashboardFocus::Search {
        return match key.code {
            KeyCode::Esc => {
                app.dashboard_focus = DashboardFocus::List;
                None
            }
            KeyCode::Enter => {
                app.dashboard_focus = DashboardFocus::List;
                app.error_message = None;
                Some(Effect::RefreshList)
            }
            _ => {
                app.query.handle_key(key);
                None
            }
        };
    }

    match key.code {
        KeyCode::Char('/') => {
            app.dashboard_focus = DashboardFocus::Search;
            None
        }
        KeyCode::Char('q') => Some(Effect::Quit),
        KeyCode::Char('L') => Some(Effect::Logout),
        KeyCode::Char('t') => {
            app.active_type = app.active_type.toggled();
            None
        }
        KeyCode::Char('n') => {
            app.new_document();
            None
        }
        KeyCode::Char('2') => {
            app.screen = Screen::Editor;
            None
        }
        KeyCode::Char('3') => {
            app.screen = Screen::Publish;
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
            None
        }
        KeyCode::Enter => {
            app.clear_messages();
            app.selected_item().map(|item| Effect::Open {
                id: item.id.clone(),
            })
        }
        _ => None,
    }
}

fn editor_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => {
                app.clear_messages();
                match app.editor.to_form().validate() {
                    Ok(()) => Some(Effect::Save),
                    Err(message) => {
                        app.error_message = Some(message);
                        None
                    }
                }
            }
            KeyCode::Char('d') => {
                // Delete is only offered for existing documents.
                if app.editor.id.is_some() {
                    app.confirm = Confirm::DeleteFile;
                }
                None
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => {
            app.screen = Screen::Dashboard;
            None
        }
        KeyCode::Tab => {
            app.editor.next_field();
            None
        }
        KeyCode::BackTab => {
            app.editor.prev_field();
            None
        }
        _ => {
            edit_field(app, key);
            None
        }
    }
}

fn edit_field(app: &mut App, key: KeyEvent) {
    match app.editor.field {
        EditorField::Kind => {
            if matches!(
                key.code,
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right
            ) {
                app.editor.kind = app.editor.kind.toggled();
            }
        }
        EditorField::Draft => {
            if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                app.editor.draft = !app.editor.draft;
            }
        }
        EditorField::Body => app.editor.body.handle_key(key),
        _ => {
            if let Some(input) = app.editor.focused_input() {
                input.handle_key(key);
            }
        }
    }
}

fn publish_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if app.message_focused {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.message_focused = false;
                None
            }
            _ => {
                app.publish_message.handle_key(key);
                None
            }
        };
    }

    match key.code {
        KeyCode::Char('m') | KeyCode::Char('/') => {
            app.message_focused = true;
            None
        }
        KeyCode::Char('r') => {
            app.error_message = None;
            Some(Effect::RefreshGitStatus)
        }
        KeyCode::Char('p') | KeyCode::Enter => {
            if app.can_publish() {
                app.clear_messages();
                Some(Effect::Publish {
                    message: app.publish_message.value().trim().to_string(),
                })
            } else {
                None
            }
        }
        KeyCode::Char('q') => Some(Effect::Quit),
        KeyCode::Char('L') => Some(Effect::Logout),
        KeyCode::Char('1') => {
            app.screen = Screen::Dashboard;
            None
        }
        KeyCode::Char('2') => {
            app.screen = Screen::Editor;
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app() -> App {
        App::new("2024-01-15".to_string())
    }

    fn logged_in_app() -> App {
        let mut app = app();
        app.apply_login();
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn document(frontmatter: serde_json::Value) -> ContentDocument {
        ContentDocument {
            id: "post/2024/my-post".to_string(),
            kind: ContentType::Post,
            path: "content/posts/2024/my-post.md".to_string(),
            frontmatter: frontmatter.as_object().unwrap().clone(),
            body: "Hello.".to_string(),
            raw: String::new(),
        }
    }

    fn summary(id: &str) -> ContentSummary {
        ContentSummary {
            id: id.to_string(),
            kind: ContentType::Note,
            path: format!("content/notes/{}.md", id),
            slug: id.to_string(),
            title: id.to_string(),
            date: None,
            draft: Some(true),
            updated_at: "2024-01-15T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_startup_state_is_logged_out() {
        let app = app();
        assert!(!app.logged_in);
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.active_type, ContentType::Note);
    }

    #[test]
    fn test_login_submits_password() {
        let mut app = app();
        for c in "secret".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        let effect = handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(
            effect,
            Some(Effect::Login {
                password: "secret".to_string()
            })
        );
    }

    #[test]
    fn test_login_with_empty_password_does_nothing() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), None);
    }

    #[test]
    fn test_apply_login_moves_to_dashboard() {
        let mut app = app();
        app.password.set("secret");
        app.apply_login();
        assert!(app.logged_in);
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.password.value(), "");
    }

    #[test]
    fn test_open_document_populates_editor() {
        let mut app = logged_in_app();
        let doc = document(json!({"title": "T", "categories": ["x", "y"]}));
        app.open_document(&doc);

        assert_eq!(app.screen, Screen::Editor);
        assert_eq!(app.editor.title.value(), "T");
        assert_eq!(app.editor.categories.value(), "x, y");
        assert!(app.editor.draft);
        assert_eq!(app.editor.date.value(), "2024-01-15");
        assert_eq!(app.editor.id.as_deref(), Some("post/2024/my-post"));
    }

    #[test]
    fn test_new_document_resets_form_with_active_type() {
        let mut app = logged_in_app();
        app.active_type = ContentType::Post;
        app.error_message = Some("old".to_string());

        handle_key(&mut app, press(KeyCode::Char('n')));

        assert_eq!(app.screen, Screen::Editor);
        assert_eq!(app.editor.kind, ContentType::Post);
        assert_eq!(app.editor.title.value(), "");
        assert_eq!(app.editor.id, None);
        assert_eq!(app.error_message, None);
    }

    #[test]
    fn test_save_rejected_locally_on_empty_title() {
        let mut app = logged_in_app();
        app.new_document();

        let effect = handle_key(&mut app, ctrl('s'));
        assert_eq!(effect, None);
        assert_eq!(app.error_message.as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_save_rejected_locally_on_bad_link() {
        let mut app = logged_in_app();
        app.new_document();
        app.editor.title.set("Hello");
        app.editor.link.set("not a url");

        let effect = handle_key(&mut app, ctrl('s'));
        assert_eq!(effect, None);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Link must be a valid URL")
        );
    }

    #[test]
    fn test_save_accepted_with_valid_form() {
        let mut app = logged_in_app();
        app.new_document();
        app.editor.title.set("Hello");

        let effect = handle_key(&mut app, ctrl('s'));
        assert_eq!(effect, Some(Effect::Save));
    }

    #[test]
    fn test_delete_requires_both_confirmations() {
        let mut app = logged_in_app();
        let doc = document(json!({"title": "T"}));
        app.open_document(&doc);

        assert_eq!(handle_key(&mut app, ctrl('d')), None);
        assert_eq!(app.confirm, Confirm::DeleteFile);

        assert_eq!(handle_key(&mut app, press(KeyCode::Char('y'))), None);
        assert_eq!(app.confirm, Confirm::DeleteForever);

        let effect = handle_key(&mut app, press(KeyCode::Char('y')));
        assert_eq!(
            effect,
            Some(Effect::Delete {
                id: "post/2024/my-post".to_string()
            })
        );
        assert_eq!(app.confirm, Confirm::None);
    }

    #[test]
    fn test_declining_either_confirmation_aborts() {
        let mut app = logged_in_app();
        let doc = document(json!({"title": "T"}));
        app.open_document(&doc);

        handle_key(&mut app, ctrl('d'));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('n'))), None);
        assert_eq!(app.confirm, Confirm::None);

        handle_key(&mut app, ctrl('d'));
        handle_key(&mut app, press(KeyCode::Char('y')));
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), None);
        assert_eq!(app.confirm, Confirm::None);
    }

    #[test]
    fn test_delete_not_offered_without_id() {
        let mut app = logged_in_app();
        app.new_document();

        handle_key(&mut app, ctrl('d'));
        assert_eq!(app.confirm, Confirm::None);
    }

    #[test]
    fn test_publish_disabled_without_pending_files() {
        let mut app = logged_in_app();
        app.screen = Screen::Publish;
        assert!(app.git_files.is_empty());

        assert_eq!(handle_key(&mut app, press(KeyCode::Char('p'))), None);
    }

    #[test]
    fn test_publish_sends_trimmed_message() {
        let mut app = logged_in_app();
        app.screen = Screen::Publish;
        app.git_files.push(GitStatusItem {
            status: "M".to_string(),
            path: "content/notes/a.md".to_string(),
        });
        app.publish_message.set("  ship it  ");

        let effect = handle_key(&mut app, press(KeyCode::Char('p')));
        assert_eq!(
            effect,
            Some(Effect::Publish {
                message: "ship it".to_string()
            })
        );
    }

    #[test]
    fn test_logout_resets_state() {
        let mut app = logged_in_app();
        app.items.push(summary("a"));
        app.git_files.push(GitStatusItem {
            status: "M".to_string(),
            path: "x".to_string(),
        });

        app.apply_logout();

        assert!(!app.logged_in);
        assert!(app.items.is_empty());
        assert!(app.git_files.is_empty());
    }

    #[test]
    fn test_type_toggle_does_not_refetch() {
        let mut app = logged_in_app();
        let effect = handle_key(&mut app, press(KeyCode::Char('t')));
        assert_eq!(effect, None);
        assert_eq!(app.active_type, ContentType::Post);
    }

    #[test]
    fn test_search_submit_triggers_refresh() {
        let mut app = logged_in_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.dashboard_focus, DashboardFocus::Search);

        for c in "hello".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        let effect = handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(effect, Some(Effect::RefreshList));
        assert_eq!(app.query.value(), "hello");
        assert_eq!(app.dashboard_focus, DashboardFocus::List);
    }

    #[test]
    fn test_open_selected_item() {
        let mut app = logged_in_app();
        app.apply_list(ContentListResponse {
            items: vec![summary("a"), summary("b")],
            page: 1,
            page_size: 100,
            total: 2,
        });

        handle_key(&mut app, press(KeyCode::Down));
        let effect = handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(effect, Some(Effect::Open { id: "b".to_string() }));
    }

    #[test]
    fn test_list_refresh_clamps_selection() {
        let mut app = logged_in_app();
        app.apply_list(ContentListResponse {
            items: vec![summary("a"), summary("b"), summary("c")],
            page: 1,
            page_size: 100,
            total: 3,
        });
        app.selected = 2;

        app.apply_list(ContentListResponse {
            items: vec![summary("a")],
            page: 1,
            page_size: 100,
            total: 1,
        });
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app();
        let key = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: crossterm::event::KeyEventState::NONE,
        };
        assert_eq!(handle_key(&mut app, key), None);
        assert_eq!(app.password.value(), "");
    }

    #[test]
    fn test_saved_document_adopts_server_identity() {
        let mut app = logged_in_app();
        app.new_document();
        app.editor.title.set("Hello");

        let doc = document(json!({"title": "Hello"}));
        app.apply_saved(&doc);

        assert_eq!(app.editor.id.as_deref(), Some("post/2024/my-post"));
        assert_eq!(app.status_message.as_deref(), Some("Content saved."));
    }

    #[test]
    fn test_editor_field_cycle_round_trip() {
        let mut app = logged_in_app();
        app.new_document();
        let start = app.editor.field;
        for _ in 0..8 {
            app.editor.next_field();
        }
        assert_eq!(app.editor.field, start);
        for _ in 0..8 {
            app.editor.prev_field();
        }
        assert_eq!(app.editor.field, start);
    }
}
