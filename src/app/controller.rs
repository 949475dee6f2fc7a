use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::Instant;

use crate::{
    app::{
        detail::{DetailPanel, DetailView},
        notifications::{Notification, NotificationCenter},
        search::{SearchEffect, SearchMachine, SearchOutcome, SearchState},
        timers::{TimerSlot, Timers},
    },
    config::Config,
    db::ThemeStore,
    error::{AppError, AppResult},
    models::{MovieDetail, ThemePreference},
    services::providers::{DetailProvider, RecommendationProvider},
};

/// Delays the application loop enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Minimum time the searching state stays visible after a submit
    pub min_loading: Duration,
    /// Gap between hiding one notification and showing the next
    pub notification_gap: Duration,
    /// How long a revealed notification stays visible
    pub notification_duration: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            min_loading: Duration::from_millis(1500),
            notification_gap: Duration::from_millis(150),
            notification_duration: Duration::from_millis(3000),
        }
    }
}

impl From<&Config> for Timing {
    fn from(config: &Config) -> Self {
        Self {
            min_loading: Duration::from_millis(config.min_loading_ms),
            notification_gap: Duration::from_millis(config.notification_gap_ms),
            notification_duration: Duration::from_millis(config.notification_duration_ms),
        }
    }
}

/// User intents accepted by the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    /// Open the detail view for the result at this position
    OpenDetail(usize),
    CloseDetail,
    ToggleTheme,
    SetTheme(ThemePreference),
    DismissNotification,
}

/// Completions flowing back into the loop from fetches and timers
#[derive(Debug)]
enum Event {
    SearchCompleted { generation: u64, outcome: SearchOutcome },
    LoadingFloorElapsed { generation: u64 },
    RevealNotification { ticket: u64 },
    ExpireNotification { ticket: u64 },
    DetailLoaded { ticket: u64, result: Result<MovieDetail, String> },
}

/// Immutable snapshot of everything the host renders
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub search: SearchState,
    pub notification: Notification,
    pub detail: Option<DetailView>,
    pub theme: ThemePreference,
}

/// The application root: wires providers, preferences and timing together
pub struct App {
    recommendations: Arc<dyn RecommendationProvider>,
    details: Arc<dyn DetailProvider>,
    themes: ThemeStore,
    timing: Timing,
}

impl App {
    pub fn new(
        recommendations: Arc<dyn RecommendationProvider>,
        details: Arc<dyn DetailProvider>,
        themes: ThemeStore,
        timing: Timing,
    ) -> Self {
        Self {
            recommendations,
            details,
            themes,
            timing,
        }
    }

    /// Spawns the application loop
    ///
    /// The loop runs until every [`AppHandle`] has been dropped.
    pub fn start(self) -> (AppHandle, JoinHandle<()>) {
        let theme = self.themes.load();
        tracing::info!(theme = %theme, "Loaded theme preference");

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(ViewState {
            theme,
            ..ViewState::default()
        });

        let app_loop = AppLoop {
            recommendations: self.recommendations,
            details: self.details,
            themes: self.themes,
            timing: self.timing,
            search: SearchMachine::new(self.timing.min_loading),
            notifications: NotificationCenter::new(),
            detail: DetailPanel::new(),
            theme,
            timers: Timers::new(event_tx.clone()),
            events: event_tx,
            search_task: None,
            detail_task: None,
            view: view_tx,
        };

        let task = tokio::spawn(app_loop.run(command_rx, event_rx));

        let handle = AppHandle {
            commands: command_tx,
            view: view_rx,
        };

        (handle, task)
    }
}

/// Cloneable handle for sending commands and observing the view
#[derive(Clone)]
pub struct AppHandle {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<ViewState>,
}

impl AppHandle {
    pub fn send(&self, command: Command) -> AppResult<()> {
        self.commands
            .send(command)
            .map_err(|_| AppError::Internal("application loop has stopped".to_string()))
    }

    pub fn submit(&self, query: impl Into<String>) -> AppResult<()> {
        self.send(Command::Submit(query.into()))
    }

    pub fn open_detail(&self, index: usize) -> AppResult<()> {
        self.send(Command::OpenDetail(index))
    }

    pub fn close_detail(&self) -> AppResult<()> {
        self.send(Command::CloseDetail)
    }

    pub fn toggle_theme(&self) -> AppResult<()> {
        self.send(Command::ToggleTheme)
    }

    pub fn set_theme(&self, theme: ThemePreference) -> AppResult<()> {
        self.send(Command::SetTheme(theme))
    }

    pub fn dismiss_notification(&self) -> AppResult<()> {
        self.send(Command::DismissNotification)
    }

    /// Current snapshot
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }
}

/// Sole owner of all mutable application state
struct AppLoop {
    recommendations: Arc<dyn RecommendationProvider>,
    details: Arc<dyn DetailProvider>,
    themes: ThemeStore,
    timing: Timing,
    search: SearchMachine,
    notifications: NotificationCenter,
    detail: DetailPanel,
    theme: ThemePreference,
    timers: Timers<Event>,
    events: mpsc::UnboundedSender<Event>,
    search_task: Option<AbortHandle>,
    detail_task: Option<AbortHandle>,
    view: watch::Sender<ViewState>,
}

impl AppLoop {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut events: mpsc::UnboundedReceiver<Event>,
    ) {
        tracing::info!("Application loop started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
            self.publish();
        }

        self.timers.cancel_all();
        abort(&mut self.search_task);
        abort(&mut self.detail_task);
        tracing::info!("Application loop stopped");
    }

    fn handle_command(&mut self, command: Command) {
        tracing::debug!(?command, "Handling command");

        match command {
            Command::Submit(query) => {
                let effects = self.search.submit(&query, Instant::now());
                self.apply_search_effects(effects);
            }
            Command::OpenDetail(index) => self.open_detail(index),
            Command::CloseDetail => {
                self.detail.close();
                abort(&mut self.detail_task);
            }
            Command::ToggleTheme => self.set_theme(self.theme.toggled()),
            Command::SetTheme(theme) => self.set_theme(theme),
            Command::DismissNotification => {
                self.notifications.dismiss();
                self.timers.cancel(TimerSlot::NotificationExpire);
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::SearchCompleted {
                generation,
                outcome,
            } => {
                if generation != self.search.generation() {
                    tracing::debug!(generation, "Discarding stale search response");
                    return;
                }
                self.search_task = None;
                let effects = self.search.complete(generation, outcome, Instant::now());
                self.apply_search_effects(effects);
            }
            Event::LoadingFloorElapsed { generation } => {
                if !self.search.settle(generation) {
                    tracing::debug!(generation, "Loading floor elapsed for stale search");
                }
            }
            Event::RevealNotification { ticket } => {
                if self.notifications.reveal(ticket) {
                    self.timers.schedule(
                        TimerSlot::NotificationExpire,
                        self.timing.notification_duration,
                        Event::ExpireNotification { ticket },
                    );
                }
            }
            Event::ExpireNotification { ticket } => {
                self.notifications.expire(ticket);
            }
            Event::DetailLoaded { ticket, result } => {
                if let Err(error) = &result {
                    tracing::warn!(error = %error, "Detail fetch failed");
                }
                if !self.detail.resolve(ticket, result) {
                    tracing::debug!(ticket, "Discarding detail result for closed view");
                } else {
                    self.detail_task = None;
                }
            }
        }
    }

    fn apply_search_effects(&mut self, effects: Vec<SearchEffect>) {
        for effect in effects {
            match effect {
                SearchEffect::Notify(message) => self.notify(message),
                SearchEffect::Fetch { generation, query } => self.spawn_search(generation, query),
                SearchEffect::Hold {
                    generation,
                    remaining,
                } => self.timers.schedule(
                    TimerSlot::LoadingFloor,
                    remaining,
                    Event::LoadingFloorElapsed { generation },
                ),
            }
        }
    }

    fn notify(&mut self, message: String) {
        tracing::debug!(message = %message, "Notification requested");
        let ticket = self.notifications.request(message);
        self.timers.cancel(TimerSlot::NotificationExpire);
        self.timers.schedule(
            TimerSlot::NotificationReveal,
            self.timing.notification_gap,
            Event::RevealNotification { ticket },
        );
    }

    fn spawn_search(&mut self, generation: u64, query: String) {
        abort(&mut self.search_task);
        self.timers.cancel(TimerSlot::LoadingFloor);

        tracing::info!(generation, query = %query, "Searching for recommendations");

        let provider = Arc::clone(&self.recommendations);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let outcome = provider
                .fetch_recommendations(&query)
                .await
                .map_err(|e| {
                    tracing::warn!(error = %e, generation, "Recommendation fetch failed");
                    e.to_string()
                });
            let _ = events.send(Event::SearchCompleted {
                generation,
                outcome,
            });
        });

        self.search_task = Some(task.abort_handle());
    }

    fn open_detail(&mut self, index: usize) {
        let Some(movie) = self.search.state().results().get(index).cloned() else {
            tracing::warn!(index, "No result at this position to open");
            return;
        };

        abort(&mut self.detail_task);
        let ticket = self.detail.open(movie.clone());

        let provider = Arc::clone(&self.details);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let result = provider
                .fetch_details(&movie)
                .await
                .map_err(|e| e.to_string());
            let _ = events.send(Event::DetailLoaded { ticket, result });
        });

        self.detail_task = Some(task.abort_handle());
    }

    fn set_theme(&mut self, theme: ThemePreference) {
        self.theme = theme;
        if let Err(e) = self.themes.save(theme) {
            tracing::warn!(error = %e, theme = %theme, "Failed to persist theme preference");
        }
    }

    fn snapshot(&self) -> ViewState {
        ViewState {
            search: self.search.state().clone(),
            notification: self.notifications.current().clone(),
            detail: self.detail.view().cloned(),
            theme: self.theme,
        }
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.view.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

fn abort(task: &mut Option<AbortHandle>) {
    if let Some(handle) = task.take() {
        handle.abort();
    }
}
