use crate::api::Api;
use crate::error::{AppError, AppResult};
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::StateLogger;
use crate::persist::{self, FileStorage};
use crate::state::{SettingsState, UiState};
use crate::ui::{Theme, ThemePresentation};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;
pub type StateSaveSender = std::sync::mpsc::Sender<()>;
type StateSaveReceiver = std::sync::mpsc::Receiver<()>;

/// Startup options resolved from the command line and environment.
///
pub struct Options {
    pub api_url: String,
    pub access_token: String,
    pub storage_dir: Option<String>,
}

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    options: Options,
    state: Arc<Mutex<UiState>>,
    settings: Arc<Mutex<SettingsState>>,
    storage: Arc<FileStorage>,
    presentation: Arc<std::sync::Mutex<Theme>>,
}

impl App {
    /// Start a new application according to the given options. Returns the
    /// result of the application execution.
    ///
    pub async fn start(options: Options) -> AppResult<()> {
        let (net_tx, net_rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let (save_tx, save_rx) = std::sync::mpsc::channel::<()>();

        let storage = Arc::new(FileStorage::new(options.storage_dir.as_deref())?);

        // The presentation handle is what the render loop reads; the
        // settings container drives it through the sink, including during
        // rehydration, so the first frame already shows the stored theme.
        let presentation = Arc::new(std::sync::Mutex::new(Theme::dark()));
        let sink = ThemePresentation::new(Arc::clone(&presentation));
        let mut settings = SettingsState::new(Box::new(sink), Some(save_tx.clone()));
        persist::rehydrate(&mut settings, storage.as_ref());

        let mut ui_state = UiState::new(save_tx);
        persist::rehydrate(&mut ui_state, storage.as_ref());

        let app = App {
            options,
            state: Arc::new(Mutex::new(ui_state)),
            settings: Arc::new(Mutex::new(settings)),
            storage,
            presentation,
        };

        app.install_logger()?;
        info!("Starting application...");
        app.start_network(net_rx);
        app.start_save_listener(save_rx);
        app.start_ui(net_tx).await?;

        // Persist both stores once more on exit.
        {
            let state = app.state.lock().await;
            persist::persist(&*state, app.storage.as_ref());
            let settings = app.settings.lock().await;
            persist::persist(&*settings, app.storage.as_ref());
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Install the state-capturing logger so log entries reach the debug
    /// buffer in UI state.
    ///
    fn install_logger(&self) -> AppResult<()> {
        let logger = StateLogger::new();
        let state = Arc::clone(&self.state);
        logger.set_log_callback(Box::new(move |entry| {
            // try_lock: never block (or re-enter) the owner of the lock
            // just to capture a log line; dropped entries are acceptable.
            if let Ok(mut state) = state.try_lock() {
                state.push_debug_entry(entry);
            }
        }));
        log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) {
        debug!("Creating new thread for asynchronous networking...");
        let state = Arc::clone(&self.state);
        let settings = Arc::clone(&self.settings);
        let api_url = self.options.api_url.clone();
        let access_token = self.options.access_token.clone();
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Failed to build networking runtime")
                .block_on(async {
                    let api = Api::new(&access_token, &api_url);
                    let mut handler = NetworkEventHandler::new(&state, &settings, &api);
                    while let Ok(event) = net_receiver.recv() {
                        if let Err(e) = handler.handle(event).await {
                            error!("Failed to handle network event: {}", e);
                        }
                    }
                })
        });
    }

    /// Start a thread to drain persistence requests. Writes are
    /// fire-and-forget; a failed write never rolls back the action that
    /// triggered it.
    ///
    fn start_save_listener(&self, receiver: StateSaveReceiver) {
        let state = Arc::clone(&self.state);
        let settings = Arc::clone(&self.settings);
        let storage = Arc::clone(&self.storage);
        std::thread::spawn(move || {
            while receiver.recv().is_ok() {
                if let Ok(state) = state.try_lock() {
                    persist::persist(&*state, storage.as_ref());
                }
                if let Ok(settings) = settings.try_lock() {
                    persist::persist(&*settings, storage.as_ref());
                }
            }
        });
    }

    /// Begin the terminal event poll on a separate thread before starting
    /// the render loop on the main thread. Return the result following an
    /// exit request or unrecoverable error.
    ///
    async fn start_ui(&self, net_sender: NetworkEventSender) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        net_sender
            .send(NetworkEvent::Boards)
            .map_err(|e| AppError::Other(e.to_string()))?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            let mut settings = self.settings.lock().await;
            let theme = match self.presentation.lock() {
                Ok(theme) => theme.clone(),
                Err(_) => Theme::dark(),
            };
            terminal.draw(|frame| {
                state.set_terminal_size(frame.size());
                crate::ui::render(frame, &mut state, &settings, &theme);
            })?;
            if !terminal_event_handler
                .handle_next(&mut state, &mut settings)
                .map_err(|e| AppError::Terminal(e.to_string()))?
            {
                debug!("Received application exit request.");
                break;
            }
        }

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

        Ok(())
    }
}
