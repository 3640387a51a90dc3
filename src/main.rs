use nem_balance_processor::api::{self, AppState};
use nem_balance_processor::db::{init_db, AccountRepository};
use nem_balance_processor::network::{AddressDeriver, NetworkAddressDeriver};
use nem_balance_processor::nis::{NisNodeClient, NodeClient};
use nem_balance_processor::processor::{run_consumer, Reconciler};
use nem_balance_processor::transport::{in_memory_queue, ChannelPublisher, TopicScheme};
use nem_balance_processor::Config;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    // Initialize database and dependencies
    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let repo = Arc::new(AccountRepository::new(pool));
    let node: Arc<dyn NodeClient> = Arc::new(NisNodeClient::new(config.node_url.clone()));
    let deriver: Arc<dyn AddressDeriver> = Arc::new(NetworkAddressDeriver::new(config.network));
    let topics = TopicScheme::new(&config.service_name);

    let (queue_handle, queue) = in_memory_queue(1024);
    let (publisher, mut balance_events) = ChannelPublisher::new(256);

    // Surface published balance events in the process log.
    tokio::spawn(async move {
        while let Ok(event) = balance_events.recv().await {
            tracing::debug!(
                "Published {} ({} bytes)",
                event.topic,
                event.payload.len()
            );
        }
    });

    let reconciler = Arc::new(Reconciler::new(
        node,
        repo.clone(),
        Arc::new(publisher),
        deriver,
        topics.clone(),
    ));
    tokio::spawn(run_consumer(queue, reconciler, config.prefetch_count));

    // Create router
    let app = api::create_router(AppState::new(repo, queue_handle, topics));

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
