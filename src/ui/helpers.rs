//! Helpers shared by the input handlers and the event loop.

use crate::app::{App, AppEvent};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Spawned tasks report the panic message through `AppEvent::TaskPanicked`
/// instead of disappearing silently.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

/// Load articles from the app's source in a background task.
///
/// Does nothing while a load is already running. The result arrives as
/// `AppEvent::Loaded` tagged with the generation returned by `begin_load`.
pub fn spawn_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if app.loading {
        app.set_status("Already loading...");
        return;
    }

    let generation = app.begin_load();
    let source = app.source.clone();
    let tx = event_tx.clone();
    app.set_status(format!("Loading from {}...", source.describe()));
    tracing::debug!(generation, source = %source.describe(), "Spawning load task");

    tokio::spawn(async move {
        let event = match catch_task_panic(source.load()).await {
            Ok(result) => AppEvent::Loaded {
                generation,
                result: result.map_err(|e| e.to_string()),
            },
            Err(error) => {
                tracing::error!(error = %error, "Load task panicked");
                AppEvent::TaskPanicked { task: "load", error }
            }
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send load result (receiver dropped)");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catch_task_panic_passes_result() {
        assert_eq!(catch_task_panic(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_catch_task_panic_captures_message() {
        let result: Result<(), String> = catch_task_panic(async { panic!("boom") }).await;
        assert_eq!(result, Err("boom".to_string()));
    }
}
