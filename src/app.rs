// App state and main event loop.
// Routes keys to the controller and board widget, and spawns background fetches.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::ListState};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::cache::{RepoCache, SharedStore};
use crate::config::Settings;
use crate::error::Result;
use crate::github::{GitHubClient, RateLimit, RepoSource, Repository};
use crate::portfolio::{Category, ReadmeResolver, RepoFetcher};
use crate::state::{BoardWidget, Controller, ImageJob};
use crate::ui;

/// Approximate pixel width of one terminal column, for sizing the board embed.
pub const CELL_WIDTH_PX: u32 = 8;

/// Results delivered from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    ReposLoaded {
        generation: u64,
        result: Result<Vec<Repository>>,
    },
    ReadmeImage {
        job: ImageJob,
        url: String,
    },
    Rendered,
}

/// What keystrokes currently edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Username(String),
    BoardUrl(String),
    Search,
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Category,
    pub controller: Controller,
    pub board: BoardWidget,
    pub input: InputMode,
    /// Selection per category tab.
    pub list_states: [ListState; 4],
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    client: GitHubClient,
    fetcher: Arc<RepoFetcher>,
    resolver: ReadmeResolver,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(settings: &Settings, store: SharedStore, client: GitHubClient) -> Self {
        let source: Arc<dyn RepoSource> = Arc::new(client.clone());

        let mut fetcher = RepoFetcher::new(source.clone(), RepoCache::new(store.clone()));
        if !settings.read_cache {
            fetcher = fetcher.bypass_cache_reads();
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut controller = Controller::new(store.clone());
        let hook_tx = events_tx.clone();
        controller.set_render_hook(Box::new(move || {
            let _ = hook_tx.send(AppEvent::Rendered);
        }));

        let width = crossterm::terminal::size()
            .map(|(cols, _)| u32::from(cols) * CELL_WIDTH_PX)
            .unwrap_or(0);

        Self {
            active_tab: Category::default(),
            controller,
            board: BoardWidget::init(store, width),
            input: InputMode::Normal,
            list_states: Default::default(),
            show_help: false,
            should_quit: false,
            client,
            fetcher: Arc::new(fetcher),
            resolver: ReadmeResolver::new(source, &settings.page_protocol),
            events_tx,
            events_rx,
        }
    }

    /// Most recent rate limit reported by the API.
    pub fn rate_limit(&self) -> RateLimit {
        self.client.rate_limit()
    }

    /// Main event loop. Auto-loads `initial_username` if given.
    pub fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        initial_username: Option<String>,
    ) -> io::Result<()> {
        if let Some(username) = initial_username {
            self.start_load(username);
        }

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.drain_app_events();
            self.handle_terminal_events()?;
        }
        Ok(())
    }

    /// Begin a load pass and fetch in the background.
    pub fn start_load(&mut self, username: String) {
        let generation = self.controller.begin_load(&username);
        let fetcher = self.fetcher.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = fetcher.fetch(&username).await;
            let _ = tx.send(AppEvent::ReposLoaded { generation, result });
        });
    }

    fn spawn_image_job(&self, job: ImageJob) {
        let resolver = self.resolver.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            if let Some(url) = resolver
                .resolve(&job.owner, &job.repo, job.branch.as_deref())
                .await
            {
                let _ = tx.send(AppEvent::ReadmeImage { job, url });
            }
        });
    }

    fn drain_app_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ReposLoaded { generation, result } => {
                for job in self.controller.finish_load(generation, result) {
                    self.spawn_image_job(job);
                }
            }
            AppEvent::ReadmeImage { job, url } => {
                if !self.controller.apply_readme_image(&job, &url) {
                    debug!(
                        repo = %job.repo,
                        job_generation = job.generation,
                        current = self.controller.generation(),
                        "discarded stale readme image"
                    );
                }
            }
            AppEvent::Rendered => self.reset_selection(),
        }
    }

    fn reset_selection(&mut self) {
        for category in Category::ALL {
            let state = &mut self.list_states[category.index()];
            if self.controller.count(category) > 0 {
                state.select(Some(0));
            } else {
                state.select(None);
            }
        }
    }

    /// Handle keyboard and resize events.
    fn handle_terminal_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Resize(cols, _) => self.board.resize(u32::from(cols) * CELL_WIDTH_PX),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match std::mem::take(&mut self.input) {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Username(buffer) => self.handle_username_key(key, buffer),
            InputMode::BoardUrl(buffer) => self.handle_board_key(key, buffer),
            InputMode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.active_tab = self.active_tab.next();
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.active_tab = self.active_tab.prev();
            }
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('/') => self.input = InputMode::Search,
            KeyCode::Char('u') => {
                let current = self
                    .controller
                    .username()
                    .map(str::to_string)
                    .or_else(|| self.controller.stored_username())
                    .unwrap_or_default();
                self.input = InputMode::Username(current);
            }
            KeyCode::Char('U') => {
                self.controller.clear_username();
                self.reset_selection();
            }
            KeyCode::Char('p') => {
                self.input = InputMode::BoardUrl(self.board.stored_url().unwrap_or_default());
            }
            KeyCode::Char('P') => self.board.clear(),
            KeyCode::Char('r') => {
                if let Some(username) = self.controller.username().map(str::to_string) {
                    self.start_load(username);
                }
            }
            KeyCode::Esc => self.controller.set_search(""),
            _ => {}
        }
    }

    fn handle_username_key(&mut self, key: KeyEvent, mut buffer: String) {
        match key.code {
            KeyCode::Enter => {
                if let Ok(username) = self.controller.save_username(&buffer) {
                    self.start_load(username);
                }
            }
            KeyCode::Esc => {}
            code => {
                edit_buffer(&mut buffer, code);
                self.input = InputMode::Username(buffer);
            }
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent, mut buffer: String) {
        match key.code {
            KeyCode::Enter => {
                if self.board.save(&buffer).is_ok() {
                    self.active_tab = Category::Graphics;
                }
            }
            KeyCode::Esc => {}
            code => {
                edit_buffer(&mut buffer, code);
                self.input = InputMode::BoardUrl(buffer);
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {}
            KeyCode::Esc => self.controller.set_search(""),
            code => {
                let mut query = self.controller.search_query().to_string();
                edit_buffer(&mut query, code);
                self.controller.set_search(&query);
                self.input = InputMode::Search;
                self.reset_selection();
            }
        }
    }

    fn select_next(&mut self) {
        let len = self.controller.count(self.active_tab);
        let state = &mut self.list_states[self.active_tab.index()];
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i, // Stay at end
            None => 0,
        };
        state.select(Some(i));
    }

    fn select_prev(&mut self) {
        let len = self.controller.count(self.active_tab);
        let state = &mut self.list_states[self.active_tab.index()];
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| i.saturating_sub(1));
        state.select(Some(i));
    }
}

/// Apply a text-editing key to an input buffer.
fn edit_buffer(buffer: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(c) => buffer.push(c),
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => {}
    }
}
