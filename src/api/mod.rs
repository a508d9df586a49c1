mod client;
mod error;
mod resource;

pub use error::ApiError;
pub use resource::*;

use anyhow::Result;
use client::Client;
use log::*;
use serde::Deserialize;

/// Responsible for asynchronous interaction with the data API including
/// transformation of response data into explicitly-defined types.
///
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given access token and base URL.
    ///
    pub fn new(access_token: &str, base_url: &str) -> Api {
        debug!("Initializing data API client for {}...", base_url);
        Api {
            client: Client::new(access_token, base_url),
        }
    }

    /// Returns the ordered board list for the current user.
    ///
    pub async fn boards(&self) -> Result<Vec<Board>> {
        debug!("Requesting board list...");

        #[derive(Deserialize)]
        struct BoardModel {
            gid: String,
            name: String,
        }

        let data: Vec<BoardModel> = self.client.list("boards").await?;
        debug!("Retrieved {} boards.", data.len());

        Ok(data
            .into_iter()
            .map(|b| Board {
                gid: b.gid,
                name: b.name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn boards_success() -> Result<()> {
        let token: Uuid = UUIDv4.fake();
        let boards: [Board; 2] = [Faker.fake(), Faker.fake()];

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/boards")
                    .header("Authorization", &format!("Bearer {}", &token));
                then.status(200).json_body(json!({
                    "data": [
                        { "gid": boards[0].gid, "name": boards[0].name },
                        { "gid": boards[1].gid, "name": boards[1].name },
                    ]
                }));
            })
            .await;

        let api = Api::new(&token.to_string(), &server.base_url());
        let listed = api.boards().await?;
        mock.assert_async().await;
        assert_eq!(listed, boards);
        Ok(())
    }

    #[tokio::test]
    async fn boards_unauthorized() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/boards");
                then.status(401);
            })
            .await;

        let api = Api::new("", &server.base_url());
        assert!(api.boards().await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn boards_malformed_body() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/boards");
                then.status(200).json_body(json!({ "boards": [] }));
            })
            .await;

        let api = Api::new("", &server.base_url());
        assert!(api.boards().await.is_err());
        mock.assert_async().await;
    }
}
