//! Chat client - terminal front end for the conversational AI backend
//!
//! A conversation state machine driving a REST transport, with a
//! line-oriented UI on top.

mod state_machine;
mod store;
mod transport;
mod types;
mod ui;

use store::{ChatStore, StoreConfig};
use transport::{HttpTransport, LoggingTransport, TransportConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TITLE: &str = "E-commerce AI Assistant";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't interleave with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let transport_config = TransportConfig::from_env();
    let store_config = StoreConfig::from_env();

    tracing::info!(
        base_url = %transport_config.base_url,
        timeout_secs = transport_config.timeout.as_secs(),
        user_id = %store_config.user_id,
        "Starting chat client"
    );

    let transport = LoggingTransport::new(HttpTransport::new(&transport_config)?);
    let store = ChatStore::new(store_config.context(), transport);

    ui::run(&store, TITLE).await?;

    tracing::info!(user_id = %store.user_id(), "Chat client stopped");
    Ok(())
}
