//! Application state and event loop

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::services::analysis::build_prompt;
use crate::services::{AccountSnapshot, AnalysisService, DataLoader, GraphClient, LoadTracker};
use crate::types::DateWindow;

use super::theme::Theme;
use super::widgets::{
    analysis::{AnalysisContent, AnalysisView},
    creatives::{AdSort, CreativesView},
    help::HelpPopup,
    overview::{Overview, OverviewData},
    spinner::{LoadingStage, Spinner},
    tabs::Tab,
};

/// Everything the TUI needs from the CLI to run
pub struct LaunchConfig {
    pub access_token: String,
    pub account_id: String,
    pub window: DateWindow,
    pub llm_endpoint: String,
    pub llm_key: Option<String>,
}

/// Application state
pub enum AppState {
    /// Loading data with spinner animation
    Loading {
        spinner_frame: usize,
        stage: LoadingStage,
    },
    /// Ready with loaded data
    Ready { data: Box<AccountSnapshot> },
    /// Error state
    Error { message: String },
}

/// State of the AI analysis for the current snapshot
pub enum AnalysisState {
    Idle,
    Running,
    Done { text: String },
    Failed { message: String },
}

/// Message from a background load thread
type LoadResult = (u64, Result<Box<AccountSnapshot>, String>);
/// Message from a background analysis thread
type AnalysisResult = (u64, Result<String, String>);

/// Main application
pub struct App {
    config: LaunchConfig,
    state: AppState,
    analysis: AnalysisState,
    should_quit: bool,
    current_tab: Tab,
    window: DateWindow,
    ad_sort: AdSort,
    ad_filter_low_spend: bool,
    overview_scroll: usize,
    creatives_scroll: usize,
    analysis_scroll: usize,
    show_help: bool,
    theme: Theme,
    load_tracker: LoadTracker,
    analysis_tracker: LoadTracker,
}

impl App {
    /// Create a new app in loading state
    pub fn new(config: LaunchConfig, theme: Theme) -> Self {
        let window = config.window;
        Self {
            config,
            state: AppState::Loading {
                spinner_frame: 0,
                stage: LoadingStage::Fetching,
            },
            analysis: AnalysisState::Idle,
            should_quit: false,
            current_tab: Tab::default(),
            window,
            ad_sort: AdSort::default(),
            ad_filter_low_spend: false,
            overview_scroll: 0,
            creatives_scroll: 0,
            analysis_scroll: 0,
            show_help: false,
            theme,
            load_tracker: LoadTracker::default(),
            analysis_tracker: LoadTracker::default(),
        }
    }

    /// Kick off a background load for the current window, superseding any
    /// load already in flight.
    pub fn start_load(&mut self, tx: &mpsc::Sender<LoadResult>) {
        let generation = self.load_tracker.begin();
        self.state = AppState::Loading {
            spinner_frame: 0,
            stage: LoadingStage::Fetching,
        };
        // Analysis belongs to the snapshot it was generated from
        self.analysis = AnalysisState::Idle;
        self.analysis_scroll = 0;

        let token = self.config.access_token.clone();
        let account = self.config.account_id.clone();
        let window = self.window;
        let tx = tx.clone();
        thread::spawn(move || {
            let result = load_snapshot(&token, &account, window, generation);
            let _ = tx.send((generation, result));
        });
    }

    /// Apply a finished load if it is still the latest one
    pub fn apply_load_result(&mut self, generation: u64, result: Result<Box<AccountSnapshot>, String>) {
        if !self.load_tracker.is_current(generation) {
            return;
        }
        match result {
            Ok(data) => {
                self.overview_scroll = 0;
                self.creatives_scroll = 0;
                self.state = AppState::Ready { data };
            }
            Err(message) => self.state = AppState::Error { message },
        }
    }

    /// Kick off a background analysis for the loaded snapshot
    pub fn start_analysis(&mut self, tx: &mpsc::Sender<AnalysisResult>) {
        let AppState::Ready { data } = &self.state else {
            return;
        };
        let generation = self.analysis_tracker.begin();
        self.analysis = AnalysisState::Running;
        self.analysis_scroll = 0;

        let prompt = build_prompt(
            &data.account,
            data.window,
            &data.summary,
            &data.campaigns,
            &data.ads,
        );
        let endpoint = self.config.llm_endpoint.clone();
        let key = self.config.llm_key.clone();
        let tx = tx.clone();
        thread::spawn(move || {
            let result = AnalysisService::new(&endpoint, key)
                .and_then(|service| service.analyze(&prompt))
                .map_err(|e| e.to_string());
            let _ = tx.send((generation, result));
        });
    }

    /// Apply a finished analysis if it is still the latest one
    pub fn apply_analysis_result(&mut self, generation: u64, result: Result<String, String>) {
        if !self.analysis_tracker.is_current(generation) {
            return;
        }
        self.analysis = match result {
            Ok(text) => AnalysisState::Done { text },
            Err(message) => AnalysisState::Failed { message },
        };
    }

    /// Handle keyboard events
    pub fn handle_event(
        &mut self,
        event: Event,
        load_tx: &mpsc::Sender<LoadResult>,
        analysis_tx: &mpsc::Sender<AnalysisResult>,
    ) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                if self.show_help {
                    // Any key closes help; q still quits outright
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                        _ => self.show_help = false,
                    }
                    return;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.should_quit = true;
                    }
                    KeyCode::Tab => {
                        self.current_tab = self.current_tab.next();
                    }
                    KeyCode::BackTab => {
                        self.current_tab = self.current_tab.prev();
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.scroll_up();
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        self.scroll_down();
                    }
                    KeyCode::Char(c @ '1'..='3') => {
                        if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                            self.current_tab = tab;
                        }
                    }
                    KeyCode::Char(']') => {
                        self.window = self.window.next();
                        self.start_load(load_tx);
                    }
                    KeyCode::Char('[') => {
                        self.window = self.window.prev();
                        self.start_load(load_tx);
                    }
                    KeyCode::Char('r') => {
                        self.start_load(load_tx);
                    }
                    KeyCode::Char('s') if self.current_tab == Tab::Creatives => {
                        self.ad_sort = self.ad_sort.next();
                        self.creatives_scroll = 0;
                    }
                    KeyCode::Char('f') if self.current_tab == Tab::Creatives => {
                        self.ad_filter_low_spend = !self.ad_filter_low_spend;
                        self.creatives_scroll = 0;
                    }
                    KeyCode::Char('a') => {
                        if !matches!(self.analysis, AnalysisState::Running) {
                            self.start_analysis(analysis_tx);
                            self.current_tab = Tab::Analysis;
                        }
                    }
                    KeyCode::Char('?') => {
                        self.show_help = true;
                    }
                    _ => {}
                }
            }
        }
    }

    fn active_scroll_mut(&mut self) -> &mut usize {
        match self.current_tab {
            Tab::Overview => &mut self.overview_scroll,
            Tab::Creatives => &mut self.creatives_scroll,
            Tab::Analysis => &mut self.analysis_scroll,
        }
    }

    /// Largest useful offset for the current tab's content
    fn max_scroll(&self) -> usize {
        match &self.state {
            AppState::Ready { data } => match self.current_tab {
                Tab::Overview => data.campaigns.len().saturating_sub(1),
                Tab::Creatives => data.ads.len().saturating_sub(1),
                Tab::Analysis => match &self.analysis {
                    AnalysisState::Done { text } => text.lines().count().saturating_sub(1),
                    _ => 0,
                },
            },
            _ => 0,
        }
    }

    fn scroll_up(&mut self) {
        let scroll = self.active_scroll_mut();
        *scroll = scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        let max = self.max_scroll();
        let scroll = self.active_scroll_mut();
        *scroll = (*scroll + 1).min(max);
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading {
            spinner_frame,
            stage,
        } = &self.state
        {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
                stage: *stage,
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading {
                spinner_frame,
                stage,
            } => {
                let spinner = Spinner::new(*spinner_frame, *stage);
                spinner.render(area, buf);
            }
            AppState::Ready { data } => {
                match self.current_tab {
                    Tab::Overview => {
                        let overview_data = OverviewData {
                            account: &data.account,
                            window: data.window,
                            summary: &data.summary,
                            campaigns: &data.campaigns,
                            loaded_at: data.loaded_at,
                        };
                        Overview::new(overview_data, self.overview_scroll, self.theme)
                            .with_tab(self.current_tab)
                            .render(area, buf);
                    }
                    Tab::Creatives => {
                        CreativesView::new(
                            &data.ads,
                            self.ad_sort,
                            self.ad_filter_low_spend,
                            self.creatives_scroll,
                            self.theme,
                        )
                        .with_tab(self.current_tab)
                        .render(area, buf);
                    }
                    Tab::Analysis => {
                        let content = match &self.analysis {
                            AnalysisState::Idle => AnalysisContent::Idle,
                            AnalysisState::Running => AnalysisContent::Running,
                            AnalysisState::Done { text } => AnalysisContent::Done(text),
                            AnalysisState::Failed { message } => AnalysisContent::Failed(message),
                        };
                        AnalysisView::new(content, self.analysis_scroll, self.theme)
                            .with_tab(self.current_tab)
                            .render(area, buf);
                    }
                }

                // Render help popup overlay if active
                if self.show_help {
                    let popup_area = HelpPopup::centered_area(area);
                    HelpPopup::new(self.theme).render(popup_area, buf);
                }
            }
            AppState::Error { message } => {
                let y = area.y + area.height / 2;
                let text = format!("Error: {}", message);
                let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
                buf.set_string(x, y, &text, Style::default().fg(self.theme.error()));
            }
        }
    }
}

/// One full load, run on a background thread
fn load_snapshot(
    token: &str,
    account: &str,
    window: DateWindow,
    generation: u64,
) -> Result<Box<AccountSnapshot>, String> {
    let client = GraphClient::new(token).map_err(|e| e.to_string())?;
    let loader = DataLoader::new(client);
    loader
        .load(account, window, generation)
        .map(Box::new)
        .map_err(|e| e.to_string())
}

/// Run the TUI application
pub fn run(config: LaunchConfig) -> anyhow::Result<()> {
    // Theme detection must happen before raw mode
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, config, theme);
    ratatui::restore();
    result
}

fn run_app(
    terminal: &mut DefaultTerminal,
    config: LaunchConfig,
    theme: Theme,
) -> anyhow::Result<()> {
    let mut app = App::new(config, theme);

    let (load_tx, load_rx) = mpsc::channel::<LoadResult>();
    let (analysis_tx, analysis_rx) = mpsc::channel::<AnalysisResult>();
    app.start_load(&load_tx);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Check for load completion (non-blocking)
        if let Ok((generation, result)) = load_rx.try_recv() {
            app.apply_load_result(generation, result);
        }

        // Check for analysis completion (non-blocking)
        if let Ok((generation, result)) = analysis_rx.try_recv() {
            app.apply_analysis_result(generation, result);
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            app.handle_event(ev, &load_tx, &analysis_tx);
        } else {
            app.tick();
        }
    }

    Ok(())
}
