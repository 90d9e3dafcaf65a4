//! Application state and key handling.
//!
//! All state transitions here are synchronous. Work that needs the network
//! is queued as [`AsyncCommand`]s; the event loop spawns them and feeds
//! each [`CommandResult`] back through [`App::apply_command_result`], so a
//! slow server never blocks the UI and responses may arrive in any order.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

use promptshare_api::PromptDraft;
use promptshare_core::config::ClientConfig;
use promptshare_core::{Applied, Feed, Prompt, PromptImage, StoredFile};

use crate::async_ops::{AsyncCommand, CommandResult};
use crate::config::{self, SettingField};
use crate::i18n::{self, Msg};
use crate::theme::{self, Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    Login,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Browse,
    Mine,
    Files,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Browse, Tab::Mine, Tab::Files, Tab::Settings];

    pub fn title(self) -> Msg {
        match self {
            Tab::Browse => Msg::TabPrompts,
            Tab::Mine => Msg::TabMyPrompts,
            Tab::Files => Msg::TabFiles,
            Tab::Settings => Msg::TabSettings,
        }
    }
}

/// Which prompt feed a page request belongs to. Browse and My Prompts hold
/// independent pagination state over the same endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Browse,
    Mine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Username,
    Password,
    SwitchMode,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub register_mode: bool,
    pub username: String,
    pub password: String,
    pub focus: LoginFocus,
    pub busy: bool,
    pub error: Option<String>,
}

/// Labels for the editor's text rows, in display order.
pub const EDITOR_FIELD_LABELS: [Msg; 6] = [
    Msg::PromptTitle,
    Msg::PromptContent,
    Msg::PromptTags,
    Msg::PromptSourceUrl,
    Msg::PromptSourceBy,
    Msg::PromptSourceTags,
];

/// Two-step entry for attaching an uploaded file to a prompt: the stored
/// file id first, then the image's tag line.
#[derive(Debug, Default)]
pub struct ImageInput {
    pub file_id: String,
    pub tags: String,
    pub on_tags: bool,
}

/// Modal editor for creating or updating a prompt.
#[derive(Debug, Default)]
pub struct EditorState {
    /// `None` while creating; the prompt id once editing an existing one.
    pub prompt_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub source_url: String,
    pub source_by: String,
    pub source_tags: String,
    pub images: Vec<PromptImage>,
    /// Focused row: the text fields first, then one row per image.
    pub cursor: usize,
    /// `Some` while a text row is being edited inline.
    pub edit_buffer: Option<String>,
    pub image_input: Option<ImageInput>,
    pub busy: bool,
}

impl EditorState {
    pub fn for_prompt(prompt: &Prompt) -> Self {
        Self {
            prompt_id: Some(prompt.id),
            title: prompt.title.clone(),
            content: prompt.content.clone(),
            tags: prompt.tags.clone().unwrap_or_default(),
            source_url: prompt.source_url.clone().unwrap_or_default(),
            source_by: prompt.source_by.clone().unwrap_or_default(),
            source_tags: prompt.source_tags.clone().unwrap_or_default(),
            images: prompt.images.clone(),
            ..Self::default()
        }
    }

    /// Total focusable rows: the text fields plus one row per image.
    pub fn row_count(&self) -> usize {
        EDITOR_FIELD_LABELS.len() + self.images.len()
    }

    pub fn row_text(&self, row: usize) -> &str {
        match row {
            0 => &self.title,
            1 => &self.content,
            2 => &self.tags,
            3 => &self.source_url,
            4 => &self.source_by,
            5 => &self.source_tags,
            _ => self
                .images
                .get(row - EDITOR_FIELD_LABELS.len())
                .map(|img| img.tags.as_str())
                .unwrap_or(""),
        }
    }

    fn set_row_text(&mut self, text: String) {
        match self.cursor {
            0 => self.title = text,
            1 => self.content = text,
            2 => self.tags = text,
            3 => self.source_url = text,
            4 => self.source_by = text,
            5 => self.source_tags = text,
            row => {
                if let Some(img) = self.images.get_mut(row - EDITOR_FIELD_LABELS.len()) {
                    img.tags = text;
                }
            }
        }
    }

    fn opt(text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn draft(&self) -> PromptDraft {
        PromptDraft {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            tags: Self::opt(&self.tags),
            source_url: Self::opt(&self.source_url),
            source_by: Self::opt(&self.source_by),
            source_tags: Self::opt(&self.source_tags),
        }
    }
}

pub struct App {
    pub config: ClientConfig,

    // ── View stack ─────────────────────────────────────────────────
    pub view: View,
    pub previous_view: View,
    pub active_tab: Tab,

    // ── List feeds, one per screen ─────────────────────────────────
    pub browse: Feed<Prompt>,
    pub mine: Feed<Prompt>,
    pub files: Feed<StoredFile>,
    pub browse_state: ListState,
    pub mine_state: ListState,
    pub files_state: ListState,

    // ── Search overlay ─────────────────────────────────────────────
    pub searching: bool,
    pub search_input: String,
    /// Committed filter at the moment search mode was entered, restored
    /// on Esc.
    pub search_restore: String,

    // ── Modals ─────────────────────────────────────────────────────
    pub detail: Option<Prompt>,
    pub detail_scroll: u16,
    pub editor: Option<EditorState>,
    /// Path prompt for the file upload flow.
    pub upload_input: Option<String>,

    // ── Login form ─────────────────────────────────────────────────
    pub login_form: LoginForm,

    // ── Settings ───────────────────────────────────────────────────
    pub settings_index: usize,
    pub editing_field: bool,
    pub edit_buffer: String,

    // ── In-flight operations ───────────────────────────────────────
    pub upload_busy: bool,
    pub download_busy: bool,
    pub pending_commands: Vec<AsyncCommand>,

    // ── Flash line ─────────────────────────────────────────────────
    pub flash_message: Option<(String, FlashLevel)>,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        let browse = Self::make_feed(&config);
        let mine = Self::make_feed(&config);
        let files = Self::make_feed(&config);
        Self {
            config,
            view: View::Main,
            previous_view: View::Main,
            active_tab: Tab::Browse,
            browse,
            mine,
            files,
            browse_state: ListState::default(),
            mine_state: ListState::default(),
            files_state: ListState::default(),
            searching: false,
            search_input: String::new(),
            search_restore: String::new(),
            detail: None,
            detail_scroll: 0,
            editor: None,
            upload_input: None,
            login_form: LoginForm::default(),
            settings_index: 0,
            editing_field: false,
            edit_buffer: String::new(),
            upload_busy: false,
            download_busy: false,
            pending_commands: Vec::new(),
            flash_message: None,
        }
    }

    fn make_feed<T>(config: &ClientConfig) -> Feed<T> {
        Feed::new(config.ui.page_size)
            .with_debounce(Duration::from_millis(config.ui.search_debounce_ms))
    }

    /// Resolve a message in the configured language.
    pub fn tr(&self, msg: Msg) -> &'static str {
        i18n::text(self.config.ui.language, msg)
    }

    pub fn palette(&self) -> &'static Palette {
        theme::palette(self.config.ui.theme)
    }

    /// Queue the initial page load. Called once before the first tick.
    pub fn start(&mut self) {
        self.ensure_tab_loaded();
    }

    pub fn queue(&mut self, cmd: AsyncCommand) {
        self.pending_commands.push(cmd);
    }

    /// Drain commands queued since the last tick.
    pub fn take_commands(&mut self) -> Vec<AsyncCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    /// Advance every feed's debounce timer, queueing any fetch that a
    /// committed filter produced. Called on every event-loop tick.
    pub fn poll_feeds(&mut self, now: Instant) {
        if let Some(request) = self.browse.poll(now) {
            self.queue(AsyncCommand::FetchPrompts {
                feed: FeedKind::Browse,
                request,
            });
        }
        if let Some(request) = self.mine.poll(now) {
            self.queue(AsyncCommand::FetchPrompts {
                feed: FeedKind::Mine,
                request,
            });
        }
        if let Some(request) = self.files.poll(now) {
            self.queue(AsyncCommand::FetchFiles { request });
        }
    }

    // ── Key handling ───────────────────────────────────────────────

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        // Any keypress clears a lingering flash message.
        self.flash_message = None;

        if self.view == View::Help {
            self.view = self.previous_view;
            return false;
        }
        if self.view == View::Login {
            return self.handle_login_key(key);
        }
        if self.editor.is_some() {
            return self.handle_editor_key(key);
        }
        if self.detail.is_some() {
            return self.handle_detail_key(key);
        }
        if self.upload_input.is_some() {
            return self.handle_upload_key(key);
        }
        if self.searching {
            return self.handle_search_key(key);
        }
        if self.editing_field {
            return self.handle_setting_edit_key(key);
        }

        match key {
            KeyCode::Char('?') => {
                self.previous_view = self.view;
                self.view = View::Help;
                return false;
            }
            KeyCode::Char('1') => {
                self.switch_tab(Tab::Browse);
                return false;
            }
            KeyCode::Char('2') => {
                self.switch_tab(Tab::Mine);
                return false;
            }
            KeyCode::Char('3') => {
                self.switch_tab(Tab::Files);
                return false;
            }
            KeyCode::Char('4') => {
                self.switch_tab(Tab::Settings);
                return false;
            }
            _ => {}
        }

        match self.active_tab {
            Tab::Browse => self.handle_browse_key(key),
            Tab::Mine => self.handle_mine_key(key),
            Tab::Files => self.handle_files_key(key),
            Tab::Settings => self.handle_settings_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Char('/') => self.start_search(),
            KeyCode::Char('r') => self.refresh_active(),
            KeyCode::Enter => self.open_detail(),
            _ => {}
        }
        false
    }

    fn handle_mine_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('n') => {
                if self.require_login() {
                    self.editor = Some(EditorState::default());
                }
            }
            KeyCode::Char('e') => {
                if self.require_login() {
                    if let Some(prompt) = self
                        .mine_state
                        .selected()
                        .and_then(|i| self.mine.items().get(i))
                    {
                        self.editor = Some(EditorState::for_prompt(prompt));
                    }
                }
            }
            other => return self.handle_browse_key(other),
        }
        false
    }

    fn handle_files_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('u') => {
                if !self.upload_busy {
                    self.upload_input = Some(String::new());
                }
            }
            KeyCode::Char('d') => self.start_download(),
            other => return self.handle_browse_key(other),
        }
        false
    }

    fn handle_settings_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings_index = self.settings_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = config::selectable_field_count().saturating_sub(1);
                self.settings_index = (self.settings_index + 1).min(last);
            }
            KeyCode::Enter => self.activate_setting(),
            _ => {}
        }
        false
    }

    fn handle_detail_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.detail = None;
                self.detail_scroll = 0;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyCode) -> bool {
        let now = Instant::now();
        match key {
            KeyCode::Esc => {
                self.searching = false;
                self.search_input = self.search_restore.clone();
                let restore = self.search_restore.clone();
                self.set_search_filter(restore, now);
            }
            KeyCode::Enter => self.searching = false,
            KeyCode::Backspace => {
                self.search_input.pop();
                let text = self.search_input.clone();
                self.set_search_filter(text, now);
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                let text = self.search_input.clone();
                self.set_search_filter(text, now);
            }
            _ => {}
        }
        false
    }

    fn handle_upload_key(&mut self, key: KeyCode) -> bool {
        let Some(buffer) = self.upload_input.as_mut() else {
            return false;
        };
        match key {
            KeyCode::Esc => self.upload_input = None,
            KeyCode::Enter => {
                let path = buffer.trim().to_string();
                self.upload_input = None;
                if !path.is_empty() {
                    self.upload_busy = true;
                    self.queue(AsyncCommand::UploadFile {
                        path: PathBuf::from(path),
                    });
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
        false
    }

    fn handle_login_key(&mut self, key: KeyCode) -> bool {
        if self.login_form.busy {
            return false;
        }
        match key {
            KeyCode::Esc => self.view = self.previous_view,
            KeyCode::Tab | KeyCode::Down => {
                self.login_form.focus = match self.login_form.focus {
                    LoginFocus::Username => LoginFocus::Password,
                    LoginFocus::Password => LoginFocus::SwitchMode,
                    LoginFocus::SwitchMode => LoginFocus::Username,
                };
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.login_form.focus = match self.login_form.focus {
                    LoginFocus::Username => LoginFocus::SwitchMode,
                    LoginFocus::Password => LoginFocus::Username,
                    LoginFocus::SwitchMode => LoginFocus::Password,
                };
            }
            KeyCode::Enter => match self.login_form.focus {
                LoginFocus::Username => self.login_form.focus = LoginFocus::Password,
                LoginFocus::Password => self.submit_login(),
                LoginFocus::SwitchMode => {
                    self.login_form.register_mode = !self.login_form.register_mode;
                    self.login_form.error = None;
                }
            },
            KeyCode::Backspace => match self.login_form.focus {
                LoginFocus::Username => {
                    self.login_form.username.pop();
                }
                LoginFocus::Password => {
                    self.login_form.password.pop();
                }
                LoginFocus::SwitchMode => {}
            },
            KeyCode::Char(c) => match self.login_form.focus {
                LoginFocus::Username => self.login_form.username.push(c),
                LoginFocus::Password => self.login_form.password.push(c),
                LoginFocus::SwitchMode => {}
            },
            _ => {}
        }
        false
    }

    fn handle_editor_key(&mut self, key: KeyCode) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        if editor.busy {
            return false;
        }

        if let Some(input) = editor.image_input.as_mut() {
            match key {
                KeyCode::Esc => editor.image_input = None,
                KeyCode::Enter => {
                    if !input.on_tags {
                        if input.file_id.trim().parse::<i64>().is_ok() {
                            input.on_tags = true;
                        }
                    } else {
                        let parsed = input.file_id.trim().parse::<i64>();
                        let tags = input.tags.trim().to_string();
                        editor.image_input = None;
                        if let Ok(file_id) = parsed {
                            editor.images.push(PromptImage {
                                id: None,
                                prompt_id: editor.prompt_id,
                                file_id,
                                tags,
                                file_url: None,
                            });
                        }
                    }
                }
                KeyCode::Backspace => {
                    if input.on_tags {
                        input.tags.pop();
                    } else {
                        input.file_id.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if input.on_tags {
                        input.tags.push(c);
                    } else if c.is_ascii_digit() {
                        input.file_id.push(c);
                    }
                }
                _ => {}
            }
            return false;
        }

        if let Some(buffer) = editor.edit_buffer.as_mut() {
            match key {
                KeyCode::Esc => editor.edit_buffer = None,
                KeyCode::Enter => {
                    let text = buffer.clone();
                    editor.edit_buffer = None;
                    editor.set_row_text(text);
                }
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            }
            return false;
        }

        match key {
            KeyCode::Esc => self.editor = None,
            KeyCode::Up | KeyCode::Char('k') => editor.cursor = editor.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                editor.cursor = (editor.cursor + 1).min(editor.row_count().saturating_sub(1));
            }
            KeyCode::Enter => {
                let current = editor.row_text(editor.cursor).to_string();
                editor.edit_buffer = Some(current);
            }
            KeyCode::Char('a') => editor.image_input = Some(ImageInput::default()),
            KeyCode::Char('d') => {
                if editor.cursor >= EDITOR_FIELD_LABELS.len() {
                    let idx = editor.cursor - EDITOR_FIELD_LABELS.len();
                    if idx < editor.images.len() {
                        editor.images.remove(idx);
                        editor.cursor = editor.cursor.min(editor.row_count().saturating_sub(1));
                    }
                }
            }
            KeyCode::Char('s') => self.submit_editor(),
            _ => {}
        }
        false
    }

    fn handle_setting_edit_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => {
                self.editing_field = false;
                self.edit_buffer.clear();
            }
            KeyCode::Enter => {
                if let Some(field) = config::nth_selectable_field(self.settings_index) {
                    field.set_value(&mut self.config, &self.edit_buffer);
                    if matches!(
                        field,
                        SettingField::ServerUrl | SettingField::PageSize | SettingField::DebounceMs
                    ) {
                        self.rebuild_feeds();
                    }
                    self.save_config();
                }
                self.editing_field = false;
                self.edit_buffer.clear();
            }
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Char(c) => self.edit_buffer.push(c),
            _ => {}
        }
        false
    }

    // ── Tab and selection movement ─────────────────────────────────

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.ensure_tab_loaded();
    }

    /// Fetch page 1 for the active tab's feed if it has never produced a
    /// successful first page. A failed first load retries on re-entry.
    fn ensure_tab_loaded(&mut self) {
        let cmd = match self.active_tab {
            Tab::Browse => {
                if self.browse.next_page() == 1 && !self.browse.is_loading() {
                    self.browse.refresh().map(|request| AsyncCommand::FetchPrompts {
                        feed: FeedKind::Browse,
                        request,
                    })
                } else {
                    None
                }
            }
            Tab::Mine => {
                if self.mine.next_page() == 1 && !self.mine.is_loading() {
                    self.mine.refresh().map(|request| AsyncCommand::FetchPrompts {
                        feed: FeedKind::Mine,
                        request,
                    })
                } else {
                    None
                }
            }
            Tab::Files => {
                if self.files.next_page() == 1 && !self.files.is_loading() {
                    self.files
                        .refresh()
                        .map(|request| AsyncCommand::FetchFiles { request })
                } else {
                    None
                }
            }
            Tab::Settings => None,
        };
        if let Some(cmd) = cmd {
            self.queue(cmd);
        }
    }

    fn active_len(&self) -> usize {
        match self.active_tab {
            Tab::Browse => self.browse.items().len(),
            Tab::Mine => self.mine.items().len(),
            Tab::Files => self.files.items().len(),
            Tab::Settings => 0,
        }
    }

    fn active_state_mut(&mut self) -> Option<&mut ListState> {
        match self.active_tab {
            Tab::Browse => Some(&mut self.browse_state),
            Tab::Mine => Some(&mut self.mine_state),
            Tab::Files => Some(&mut self.files_state),
            Tab::Settings => None,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let mut at_tail = false;
        if let Some(state) = self.active_state_mut() {
            let next = match state.selected() {
                Some(i) => (i + 1).min(len - 1),
                None => 0,
            };
            state.select(Some(next));
            at_tail = next + 1 == len;
        }
        if at_tail {
            self.request_tail();
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        if let Some(state) = self.active_state_mut() {
            let prev = match state.selected() {
                Some(i) => i.saturating_sub(1),
                None => 0,
            };
            state.select(Some(prev));
        }
    }

    pub fn select_first(&mut self) {
        if self.active_len() == 0 {
            return;
        }
        if let Some(state) = self.active_state_mut() {
            state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        if let Some(state) = self.active_state_mut() {
            state.select(Some(len - 1));
        }
        self.request_tail();
    }

    /// The selection reached the bottom of the loaded rows; ask the feed
    /// for its next page. The feed suppresses duplicates itself.
    fn request_tail(&mut self) {
        let cmd = match self.active_tab {
            Tab::Browse => self.browse.tail_visible().map(|request| {
                AsyncCommand::FetchPrompts {
                    feed: FeedKind::Browse,
                    request,
                }
            }),
            Tab::Mine => self.mine.tail_visible().map(|request| AsyncCommand::FetchPrompts {
                feed: FeedKind::Mine,
                request,
            }),
            Tab::Files => self
                .files
                .tail_visible()
                .map(|request| AsyncCommand::FetchFiles { request }),
            Tab::Settings => None,
        };
        if let Some(cmd) = cmd {
            self.queue(cmd);
        }
    }

    fn refresh_active(&mut self) {
        let cmd = match self.active_tab {
            Tab::Browse => self.browse.refresh().map(|request| AsyncCommand::FetchPrompts {
                feed: FeedKind::Browse,
                request,
            }),
            Tab::Mine => self.mine.refresh().map(|request| AsyncCommand::FetchPrompts {
                feed: FeedKind::Mine,
                request,
            }),
            Tab::Files => self
                .files
                .refresh()
                .map(|request| AsyncCommand::FetchFiles { request }),
            Tab::Settings => None,
        };
        let Some(cmd) = cmd else {
            return;
        };
        self.queue(cmd);
        if let Some(state) = self.active_state_mut() {
            state.select(None);
        }
    }

    // ── Search ─────────────────────────────────────────────────────

    fn start_search(&mut self) {
        let current = match self.active_tab {
            Tab::Browse => self.browse.filter().to_string(),
            Tab::Mine => self.mine.filter().to_string(),
            _ => return,
        };
        self.search_restore = current.clone();
        self.search_input = current;
        self.searching = true;
    }

    fn set_search_filter(&mut self, text: String, now: Instant) {
        match self.active_tab {
            Tab::Browse => self.browse.set_filter(text, now),
            Tab::Mine => self.mine.set_filter(text, now),
            _ => {}
        }
    }

    // ── Detail, editor, and file actions ───────────────────────────

    fn open_detail(&mut self) {
        let prompt = match self.active_tab {
            Tab::Browse => self
                .browse_state
                .selected()
                .and_then(|i| self.browse.items().get(i))
                .cloned(),
            Tab::Mine => self
                .mine_state
                .selected()
                .and_then(|i| self.mine.items().get(i))
                .cloned(),
            _ => None,
        };
        if prompt.is_some() {
            self.detail = prompt;
            self.detail_scroll = 0;
        }
    }

    /// True when logged in; otherwise flashes and opens the login form.
    fn require_login(&mut self) -> bool {
        if self.config.auth.is_logged_in() {
            return true;
        }
        let text = self.tr(Msg::LoginRequired);
        self.flash_error(text);
        self.open_login();
        false
    }

    fn open_login(&mut self) {
        self.previous_view = self.view;
        self.view = View::Login;
        self.login_form = LoginForm::default();
    }

    fn submit_login(&mut self) {
        let username = self.login_form.username.trim().to_string();
        if username.is_empty() {
            self.login_form.focus = LoginFocus::Username;
            return;
        }
        if self.login_form.password.is_empty() {
            self.login_form.focus = LoginFocus::Password;
            return;
        }
        self.login_form.busy = true;
        self.login_form.error = None;
        let password = self.login_form.password.clone();
        let cmd = if self.login_form.register_mode {
            AsyncCommand::Register { username, password }
        } else {
            AsyncCommand::Login { username, password }
        };
        self.queue(cmd);
    }

    fn submit_editor(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        editor.busy = true;
        let draft = editor.draft();
        let images = editor.images.clone();
        let cmd = match editor.prompt_id {
            Some(id) => AsyncCommand::UpdatePrompt { id, draft, images },
            None => AsyncCommand::CreatePrompt { draft, images },
        };
        self.queue(cmd);
    }

    fn start_download(&mut self) {
        if self.download_busy {
            return;
        }
        let Some(file) = self
            .files_state
            .selected()
            .and_then(|i| self.files.items().get(i))
        else {
            return;
        };
        let id = file.id;
        let name = file.name.clone();
        self.download_busy = true;
        self.queue(AsyncCommand::DownloadFile { id, name });
    }

    // ── Settings actions ───────────────────────────────────────────

    fn activate_setting(&mut self) {
        let Some(field) = config::nth_selectable_field(self.settings_index) else {
            return;
        };
        if field.is_enum() {
            field.cycle_enum(&mut self.config);
            self.save_config();
        } else if field.is_action() {
            if self.config.auth.is_logged_in() {
                self.config.auth.clear();
                self.save_config();
            } else {
                self.open_login();
            }
        } else {
            self.editing_field = true;
            self.edit_buffer = field.raw_value(&self.config);
        }
    }

    /// Recreate the feeds after a page-size, debounce, or server change.
    /// Accumulated items are dropped; each list refetches on next entry.
    fn rebuild_feeds(&mut self) {
        self.browse = Self::make_feed(&self.config);
        self.mine = Self::make_feed(&self.config);
        self.files = Self::make_feed(&self.config);
        self.browse_state = ListState::default();
        self.mine_state = ListState::default();
        self.files_state = ListState::default();
    }

    // ── Async completions ──────────────────────────────────────────

    pub fn apply_command_result(&mut self, result: CommandResult) {
        match result {
            CommandResult::Prompts {
                feed,
                request,
                result,
            } => {
                let (feed, state) = match feed {
                    FeedKind::Browse => (&mut self.browse, &mut self.browse_state),
                    FeedKind::Mine => (&mut self.mine, &mut self.mine_state),
                };
                if feed.apply(&request, result) == Applied::Replaced {
                    state.select(if feed.items().is_empty() { None } else { Some(0) });
                }
            }
            CommandResult::Files { request, result } => {
                if self.files.apply(&request, result) == Applied::Replaced {
                    self.files_state.select(if self.files.items().is_empty() {
                        None
                    } else {
                        Some(0)
                    });
                }
            }
            CommandResult::Auth { register, result } => {
                self.login_form.busy = false;
                match result {
                    Ok((username, token)) => {
                        self.config.auth.username = username;
                        self.config.auth.token = token;
                        if let Err(e) = config::save_client_config(&self.config) {
                            self.flash_error(format!("Save failed: {e}"));
                        } else if register {
                            let text = self.tr(Msg::RegisterSuccess);
                            self.flash_success(text);
                        }
                        self.login_form = LoginForm::default();
                        self.view = View::Main;
                        self.active_tab = Tab::Browse;
                    }
                    Err(e) => {
                        let label = if register {
                            Msg::RegisterFailed
                        } else {
                            Msg::LoginFailed
                        };
                        let text = self.tr(label);
                        self.login_form.error = Some(format!("{text}: {e}"));
                    }
                }
            }
            CommandResult::PromptSaved { created, result } => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.busy = false;
                }
                match result {
                    Ok(prompt) => {
                        if created {
                            self.mine.insert_top(prompt);
                            self.mine_state.select(Some(0));
                            let text = self.tr(Msg::PromptCreateSuccess);
                            self.flash_success(text);
                        } else {
                            let id = prompt.id;
                            self.mine.replace_where(|p| p.id == id, prompt.clone());
                            self.browse.replace_where(|p| p.id == id, prompt.clone());
                            if self.detail.as_ref().is_some_and(|d| d.id == id) {
                                self.detail = Some(prompt);
                            }
                            let text = self.tr(Msg::PromptUpdateSuccess);
                            self.flash_success(text);
                        }
                        self.editor = None;
                    }
                    Err(e) => {
                        let label = if created {
                            Msg::PromptCreateFailed
                        } else {
                            Msg::PromptUpdateFailed
                        };
                        let text = self.tr(label);
                        self.flash_error(format!("{text}: {e}"));
                    }
                }
            }
            CommandResult::FileUploaded(result) => {
                self.upload_busy = false;
                match result {
                    Ok(file) => {
                        let text = self.tr(Msg::FileUploadSuccess);
                        self.flash_success(format!("{text} (id {})", file.id));
                        if let Some(request) = self.files.refresh() {
                            self.queue(AsyncCommand::FetchFiles { request });
                        }
                    }
                    Err(e) => {
                        let text = self.tr(Msg::FileUploadFailed);
                        self.flash_error(format!("{text}: {e}"));
                    }
                }
            }
            CommandResult::FileDownloaded(result) => {
                self.download_busy = false;
                match result {
                    Ok(name) => {
                        let text = self.tr(Msg::FileDownloadSuccess);
                        self.flash_success(format!("{text}: {name}"));
                    }
                    Err(e) => {
                        let text = self.tr(Msg::FileDownloadFailed);
                        self.flash_error(format!("{text}: {e}"));
                    }
                }
            }
        }
    }

    // ── Flash helpers ──────────────────────────────────────────────

    pub fn flash_success(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Success));
    }

    pub fn flash_error(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Error));
    }

    pub fn flash_info(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Info));
    }

    pub fn save_config(&mut self) {
        match config::save_client_config(&self.config) {
            Ok(()) => {
                let text = self.tr(Msg::SettingsSaved);
                self.flash_success(text);
            }
            Err(e) => {
                self.flash_error(format!("Save failed: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(ClientConfig::default())
    }

    fn prompt(id: i64, title: &str) -> Prompt {
        Prompt {
            id,
            title: title.to_string(),
            ..Prompt::default()
        }
    }

    fn prompt_batch(range: std::ops::Range<i64>) -> Vec<Prompt> {
        range.map(|i| prompt(i, &format!("prompt {i}"))).collect()
    }

    fn stored_file(id: i64, name: &str) -> StoredFile {
        StoredFile {
            id,
            name: name.to_string(),
            path: format!("/files/{name}"),
            size: 1024,
            mime: "image/png".to_string(),
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    /// Pop the single queued command, asserting it is a prompt page fetch
    /// for `expect` and returning its request.
    fn take_prompt_request(app: &mut App, expect: FeedKind) -> AsyncCommand {
        let mut cmds = app.take_commands();
        assert_eq!(cmds.len(), 1, "exactly one command queued");
        let cmd = cmds.remove(0);
        match &cmd {
            AsyncCommand::FetchPrompts { feed, .. } => assert_eq!(*feed, expect),
            _ => panic!("expected a prompt page fetch"),
        }
        cmd
    }

    fn request_of(cmd: &AsyncCommand) -> promptshare_core::PageRequest {
        match cmd {
            AsyncCommand::FetchPrompts { request, .. } => request.clone(),
            AsyncCommand::FetchFiles { request } => request.clone(),
            _ => panic!("command carries no page request"),
        }
    }

    fn load_browse_page(app: &mut App, items: Vec<Prompt>) {
        let cmd = take_prompt_request(app, FeedKind::Browse);
        let request = request_of(&cmd);
        app.apply_command_result(CommandResult::Prompts {
            feed: FeedKind::Browse,
            request,
            result: Ok(items),
        });
    }

    #[test]
    fn startup_queues_browse_first_page() {
        let mut app = app();
        app.start();
        let cmd = take_prompt_request(&mut app, FeedKind::Browse);
        let request = request_of(&cmd);
        assert_eq!(request.page, 1);
        assert_eq!(request.filter, "");
        assert_eq!(request.page_size, 9);
    }

    #[test]
    fn first_page_result_selects_top_row() {
        let mut app = app();
        app.start();
        load_browse_page(&mut app, prompt_batch(0..9));
        assert_eq!(app.browse.items().len(), 9);
        assert_eq!(app.browse_state.selected(), Some(0));
    }

    #[test]
    fn end_key_on_full_page_requests_next_page() {
        let mut app = app();
        app.start();
        load_browse_page(&mut app, prompt_batch(0..9));

        app.handle_key(KeyCode::End);
        let cmd = take_prompt_request(&mut app, FeedKind::Browse);
        assert_eq!(request_of(&cmd).page, 2);
        assert_eq!(app.browse_state.selected(), Some(8));
    }

    #[test]
    fn repeated_end_key_does_not_duplicate_requests() {
        let mut app = app();
        app.start();
        load_browse_page(&mut app, prompt_batch(0..9));

        app.handle_key(KeyCode::End);
        assert_eq!(app.take_commands().len(), 1);
        app.handle_key(KeyCode::End);
        app.handle_key(KeyCode::End);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn short_page_stops_tail_requests() {
        let mut app = app();
        app.start();
        load_browse_page(&mut app, prompt_batch(0..4));
        assert!(app.browse.exhausted());

        app.handle_key(KeyCode::End);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn stepping_onto_last_row_triggers_tail_fetch() {
        let mut app = app();
        app.start();
        load_browse_page(&mut app, prompt_batch(0..9));

        for _ in 0..7 {
            app.handle_key(KeyCode::Down);
        }
        assert!(app.take_commands().is_empty());
        app.handle_key(KeyCode::Down);
        assert_eq!(app.browse_state.selected(), Some(8));
        let cmd = take_prompt_request(&mut app, FeedKind::Browse);
        assert_eq!(request_of(&cmd).page, 2);
    }

    #[test]
    fn search_keystrokes_debounce_into_one_request() {
        let mut app = app();
        app.start();
        load_browse_page(&mut app, prompt_batch(0..9));

        app.handle_key(KeyCode::Char('/'));
        assert!(app.searching);
        for c in "cat".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        assert!(app.take_commands().is_empty());

        app.poll_feeds(Instant::now() + Duration::from_millis(600));
        let cmd = take_prompt_request(&mut app, FeedKind::Browse);
        let request = request_of(&cmd);
        assert_eq!(request.filter, "cat");
        assert_eq!(request.page, 1);
    }

    #[test]
    fn search_escape_restores_previous_filter() {
        let mut app = app();
        app.start();
        load_browse_page(&mut app, prompt_batch(0..9));

        app.handle_key(KeyCode::Char('/'));
        for c in "dog".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Esc);
        assert!(!app.searching);
        assert_eq!(app.search_input, "");

        // The restored (unchanged) filter commits without a fetch.
        app.poll_feeds(Instant::now() + Duration::from_millis(600));
        assert!(app.take_commands().is_empty());
        assert_eq!(app.browse.items().len(), 9);
    }

    #[test]
    fn stale_response_for_old_filter_is_discarded() {
        let mut app = app();
        app.start();
        let old_cmd = take_prompt_request(&mut app, FeedKind::Browse);
        let old_request = request_of(&old_cmd);

        app.handle_key(KeyCode::Char('/'));
        for c in "cat".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.poll_feeds(Instant::now() + Duration::from_millis(600));
        let new_cmd = take_prompt_request(&mut app, FeedKind::Browse);
        let new_request = request_of(&new_cmd);

        // The unfiltered page 1 resolves after "cat" committed: dropped.
        app.apply_command_result(CommandResult::Prompts {
            feed: FeedKind::Browse,
            request: old_request,
            result: Ok(prompt_batch(0..9)),
        });
        assert!(app.browse.items().is_empty());

        app.apply_command_result(CommandResult::Prompts {
            feed: FeedKind::Browse,
            request: new_request,
            result: Ok(prompt_batch(100..102)),
        });
        assert_eq!(app.browse.items().len(), 2);
        assert_eq!(app.browse_state.selected(), Some(0));
    }

    #[test]
    fn switching_to_files_tab_queues_first_page() {
        let mut app = app();
        app.start();
        app.take_commands();

        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.active_tab, Tab::Files);
        let cmds = app.take_commands();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], AsyncCommand::FetchFiles { .. }));

        // Revisiting a loaded tab does not refetch.
        let request = request_of(&cmds[0]);
        app.apply_command_result(CommandResult::Files {
            request,
            result: Ok(vec![stored_file(1, "a.png")]),
        });
        app.handle_key(KeyCode::Char('1'));
        app.handle_key(KeyCode::Char('3'));
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn login_failure_shows_error_and_stays_on_form() {
        let mut app = app();
        app.open_login();
        app.login_form.username = "bob".to_string();
        app.login_form.password = "pw".to_string();
        app.submit_login();
        assert!(app.login_form.busy);
        assert_eq!(app.take_commands().len(), 1);

        app.apply_command_result(CommandResult::Auth {
            register: false,
            result: Err("bad credentials".to_string()),
        });
        assert!(!app.login_form.busy);
        assert_eq!(app.view, View::Login);
        let error = app.login_form.error.as_deref().unwrap_or("");
        assert!(error.contains("bad credentials"));
    }

    #[test]
    fn login_success_stores_credentials_and_returns_to_browse() {
        let home = tempfile::tempdir().unwrap();
        // SAFETY: no other test in this binary reads or writes HOME.
        unsafe { std::env::set_var("HOME", home.path()) };

        let mut app = app();
        app.open_login();
        for c in "alice".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        for c in "secret".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert!(app.login_form.busy);
        let cmds = app.take_commands();
        assert!(matches!(
            cmds.as_slice(),
            [AsyncCommand::Login { username, .. }] if username.as_str() == "alice"
        ));

        app.apply_command_result(CommandResult::Auth {
            register: false,
            result: Ok(("alice".to_string(), "tok_1".to_string())),
        });
        assert_eq!(app.view, View::Main);
        assert_eq!(app.active_tab, Tab::Browse);
        assert!(app.config.auth.is_logged_in());
        assert_eq!(app.config.auth.username, "alice");
    }

    #[test]
    fn prompt_actions_require_login() {
        let mut app = app();
        app.start();
        app.take_commands();
        app.handle_key(KeyCode::Char('2'));
        app.take_commands();

        app.handle_key(KeyCode::Char('n'));
        assert!(app.editor.is_none());
        assert_eq!(app.view, View::Login);
        assert!(matches!(app.flash_message, Some((_, FlashLevel::Error))));
    }

    #[test]
    fn created_prompt_lands_at_top_of_my_list() {
        let mut app = app();
        app.config.auth.token = "tok".to_string();
        app.config.auth.username = "alice".to_string();
        app.start();
        app.take_commands();

        app.handle_key(KeyCode::Char('2'));
        let cmd = take_prompt_request(&mut app, FeedKind::Mine);
        let request = request_of(&cmd);
        app.apply_command_result(CommandResult::Prompts {
            feed: FeedKind::Mine,
            request,
            result: Ok(prompt_batch(10..13)),
        });

        app.handle_key(KeyCode::Char('n'));
        assert!(app.editor.is_some());
        if let Some(editor) = app.editor.as_mut() {
            editor.title = "New prompt".to_string();
            editor.content = "Be specific.".to_string();
        }
        app.handle_key(KeyCode::Char('s'));
        let cmds = app.take_commands();
        assert!(matches!(
            cmds.as_slice(),
            [AsyncCommand::CreatePrompt { draft, .. }] if draft.title == "New prompt"
        ));

        app.apply_command_result(CommandResult::PromptSaved {
            created: true,
            result: Ok(prompt(99, "New prompt")),
        });
        assert!(app.editor.is_none());
        assert_eq!(app.mine.items()[0].id, 99);
        assert_eq!(app.mine_state.selected(), Some(0));
        assert!(matches!(app.flash_message, Some((_, FlashLevel::Success))));
    }

    #[test]
    fn edited_prompt_is_replaced_in_place() {
        let mut app = app();
        app.config.auth.token = "tok".to_string();
        app.config.auth.username = "alice".to_string();
        app.start();
        app.take_commands();

        app.handle_key(KeyCode::Char('2'));
        let cmd = take_prompt_request(&mut app, FeedKind::Mine);
        let request = request_of(&cmd);
        app.apply_command_result(CommandResult::Prompts {
            feed: FeedKind::Mine,
            request,
            result: Ok(prompt_batch(1..4)),
        });

        app.mine_state.select(Some(1));
        app.handle_key(KeyCode::Char('e'));
        let editor = app.editor.as_ref().unwrap();
        assert_eq!(editor.prompt_id, Some(2));
        assert_eq!(editor.title, "prompt 2");

        app.handle_key(KeyCode::Char('s'));
        let cmds = app.take_commands();
        assert!(matches!(
            cmds.as_slice(),
            [AsyncCommand::UpdatePrompt { id: 2, .. }]
        ));

        app.apply_command_result(CommandResult::PromptSaved {
            created: false,
            result: Ok(prompt(2, "Renamed")),
        });
        assert!(app.editor.is_none());
        assert_eq!(app.mine.items()[1].title, "Renamed");
        assert_eq!(app.mine.items().len(), 3);
    }

    #[test]
    fn editor_attaches_image_by_file_id() {
        let mut app = app();
        app.editor = Some(EditorState::default());

        app.handle_key(KeyCode::Char('a'));
        for c in "42".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        for c in "style, example".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);

        let editor = app.editor.as_ref().unwrap();
        assert!(editor.image_input.is_none());
        assert_eq!(editor.images.len(), 1);
        assert_eq!(editor.images[0].file_id, 42);
        assert_eq!(editor.images[0].tags, "style, example");
    }

    #[test]
    fn editor_edits_text_rows_inline() {
        let mut app = app();
        app.editor = Some(EditorState::default());

        app.handle_key(KeyCode::Enter);
        for c in "Iterate".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);

        let editor = app.editor.as_ref().unwrap();
        assert!(editor.edit_buffer.is_none());
        assert_eq!(editor.title, "Iterate");
    }

    #[test]
    fn upload_success_flashes_and_refreshes_files() {
        let mut app = app();
        app.start();
        app.take_commands();
        app.handle_key(KeyCode::Char('3'));
        let cmds = app.take_commands();
        let request = request_of(&cmds[0]);
        app.apply_command_result(CommandResult::Files {
            request,
            result: Ok(vec![stored_file(1, "a.png")]),
        });

        app.handle_key(KeyCode::Char('u'));
        assert!(app.upload_input.is_some());
        for c in "/tmp/shot.png".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert!(app.upload_busy);
        let cmds = app.take_commands();
        assert!(matches!(cmds.as_slice(), [AsyncCommand::UploadFile { .. }]));

        app.apply_command_result(CommandResult::FileUploaded(Ok(stored_file(7, "shot.png"))));
        assert!(!app.upload_busy);
        assert!(matches!(app.flash_message, Some((_, FlashLevel::Success))));
        let cmds = app.take_commands();
        assert!(matches!(cmds.as_slice(), [AsyncCommand::FetchFiles { .. }]));
        assert_eq!(request_of(&cmds[0]).page, 1);
    }

    #[test]
    fn download_uses_selected_file() {
        let mut app = app();
        app.start();
        app.take_commands();
        app.handle_key(KeyCode::Char('3'));
        let cmds = app.take_commands();
        let request = request_of(&cmds[0]);
        app.apply_command_result(CommandResult::Files {
            request,
            result: Ok(vec![stored_file(1, "a.png"), stored_file(2, "b.pdf")]),
        });

        app.files_state.select(Some(1));
        app.handle_key(KeyCode::Char('d'));
        assert!(app.download_busy);
        let cmds = app.take_commands();
        assert!(matches!(
            cmds.as_slice(),
            [AsyncCommand::DownloadFile { id: 2, name }] if name.as_str() == "b.pdf"
        ));

        // A second press while the download runs is ignored.
        app.handle_key(KeyCode::Char('d'));
        assert!(app.take_commands().is_empty());

        app.apply_command_result(CommandResult::FileDownloaded(Ok("b.pdf".to_string())));
        assert!(!app.download_busy);
        assert!(matches!(app.flash_message, Some((_, FlashLevel::Success))));
    }

    #[test]
    fn settings_selection_stays_in_bounds() {
        let mut app = app();
        app.start();
        app.take_commands();
        app.handle_key(KeyCode::Char('4'));
        assert_eq!(app.active_tab, Tab::Settings);

        for _ in 0..20 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.settings_index, config::selectable_field_count() - 1);
        for _ in 0..20 {
            app.handle_key(KeyCode::Up);
        }
        assert_eq!(app.settings_index, 0);
    }

    #[test]
    fn question_mark_opens_help_and_any_key_returns() {
        let mut app = app();
        app.start();
        app.take_commands();

        app.handle_key(KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.view, View::Main);
    }

    #[test]
    fn flash_clears_on_next_keypress() {
        let mut app = app();
        app.flash_info("hello");
        assert!(app.flash_message.is_some());
        app.handle_key(KeyCode::Down);
        assert!(app.flash_message.is_none());
    }

    #[test]
    fn quit_only_from_list_views() {
        let mut app = app();
        app.start();
        app.take_commands();
        assert!(app.handle_key(KeyCode::Char('q')));

        let mut app = self::app();
        app.open_login();
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert_eq!(app.login_form.username, "q");
    }
}
