use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;

use todo_htmx::{
    config::{Config, StoreKind},
    db::Db,
    repository::{MemoryTodoRepository, SledTodoRepository, TodoRepository, TODOS},
    routes::{self, AppState},
    service::TodoService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded config");

    // the sled handle outlives the server so it can be flushed on the way out
    let (repository, db): (Arc<dyn TodoRepository>, Option<Db>) = match config.store {
        StoreKind::Sled => {
            let db = Db::open(&config.db_path)?;
            let repository = SledTodoRepository::new(db.collection(TODOS)?);
            (Arc::new(repository), Some(db))
        }
        StoreKind::Memory => (Arc::new(MemoryTodoRepository::new()), None),
    };

    let state = AppState::new(TodoService::new(repository));
    let app = routes::router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        db.flush().await?;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
