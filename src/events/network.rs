use crate::api::Api;
use crate::state::{SettingsState, UiState};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Boards,
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<UiState>>,
    settings: &'a Arc<Mutex<SettingsState>>,
    api: &'a Api,
}

impl<'a> Handler<'a> {
    /// Return new instance with references to shared state.
    ///
    pub fn new(
        state: &'a Arc<Mutex<UiState>>,
        settings: &'a Arc<Mutex<SettingsState>>,
        api: &'a Api,
    ) -> Self {
        Handler {
            state,
            settings,
            api,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Boards => self.boards().await?,
        }
        Ok(())
    }

    /// Update state with the board list. On failure the shell stays in its
    /// loading presentation; the fetch is not retried automatically.
    ///
    async fn boards(&mut self) -> Result<()> {
        info!("Fetching board list...");
        let boards = match self.api.boards().await {
            Ok(boards) => boards,
            Err(e) => {
                error!("Failed to fetch board list: {}", e);
                return Err(e);
            }
        };
        info!("Received {} boards.", boards.len());

        let mut state = self.state.lock().await;
        state.set_boards(boards);

        // A recovered snapshot index wins over the configured default board.
        if !state.was_restored() {
            let settings = self.settings.lock().await;
            if let Some(gid) = settings.default_board_gid() {
                match state.board_position(gid) {
                    Some(position) => {
                        debug!("Applying default board '{}' at position {}.", gid, position);
                        state.jump_to_board(position);
                    }
                    None => {
                        warn!("Configured default board '{}' is not in the loaded list.", gid);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{self, MemStorage};
    use crate::state::{PresentationSink, ThemeMode};
    use httpmock::MockServer;
    use serde_json::json;

    struct NullSink;

    impl PresentationSink for NullSink {
        fn apply(&self, _mode: ThemeMode) {}
    }

    fn shared_settings() -> Arc<Mutex<SettingsState>> {
        Arc::new(Mutex::new(SettingsState::new(Box::new(NullSink), None)))
    }

    async fn board_server() -> MockServer {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/boards");
                then.status(200).json_body(json!({
                    "data": [
                        { "gid": "b-1", "name": "Dashboard" },
                        { "gid": "b-2", "name": "Calendar" },
                        { "gid": "b-3", "name": "Focus" },
                    ]
                }));
            })
            .await;
        server
    }

    #[tokio::test]
    async fn boards_load_applies_set_boards() -> Result<()> {
        let server = board_server().await;
        let api = Api::new("", &server.base_url());
        let state = Arc::new(Mutex::new(UiState::default()));
        let settings = shared_settings();

        Handler::new(&state, &settings, &api)
            .handle(Event::Boards)
            .await?;

        let state = state.lock().await;
        assert_eq!(state.boards().len(), 3);
        assert_eq!(state.current_board_index(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn default_board_applies_when_nothing_was_restored() -> Result<()> {
        let server = board_server().await;
        let api = Api::new("", &server.base_url());
        let state = Arc::new(Mutex::new(UiState::default()));
        let settings = shared_settings();
        settings
            .lock()
            .await
            .set_default_board(Some("b-3".to_string()));

        Handler::new(&state, &settings, &api)
            .handle(Event::Boards)
            .await?;

        assert_eq!(state.lock().await.current_board_index(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn restored_index_wins_over_default_board() -> Result<()> {
        let server = board_server().await;
        let api = Api::new("", &server.base_url());

        // Simulate a reload with a stored snapshot pointing at index 1.
        let storage = MemStorage::new();
        let mut seeded = UiState::default();
        seeded.set_boards(vec![
            crate::api::Board {
                gid: "b-1".to_string(),
                name: "Dashboard".to_string(),
            },
            crate::api::Board {
                gid: "b-2".to_string(),
                name: "Calendar".to_string(),
            },
        ]);
        seeded.jump_to_board(1);
        persist::persist(&seeded, &storage);

        let mut restored = UiState::default();
        assert!(persist::rehydrate(&mut restored, &storage));
        let state = Arc::new(Mutex::new(restored));

        let settings = shared_settings();
        settings
            .lock()
            .await
            .set_default_board(Some("b-3".to_string()));

        Handler::new(&state, &settings, &api)
            .handle(Event::Boards)
            .await?;

        assert_eq!(state.lock().await.current_board_index(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn load_failure_leaves_the_shell_loading() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/boards");
                then.status(500);
            })
            .await;
        let api = Api::new("", &server.base_url());
        let state = Arc::new(Mutex::new(UiState::default()));
        let settings = shared_settings();

        let result = Handler::new(&state, &settings, &api)
            .handle(Event::Boards)
            .await;
        assert!(result.is_err());
        assert!(state.lock().await.boards().is_empty());
    }
}
