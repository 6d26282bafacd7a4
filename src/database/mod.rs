use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use std::time::Duration;

use crate::config::Settings;

/// Shared MongoDB handle. The driver pools connections internally, so a
/// single clone per worker is all the server needs.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Connects and pings the deployment. Returns only once the store has
    /// answered, so callers can gate serving on it.
    pub async fn connect(settings: &Settings) -> mongodb::error::Result<Self> {
        let mut client_options = mongodb::options::ClientOptions::parse(&settings.mongodb_uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&settings.database);

        let mongodb = Self { client, db };
        mongodb.ping().await?;

        Ok(mongodb)
    }

    pub async fn ping(&self) -> mongodb::error::Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
