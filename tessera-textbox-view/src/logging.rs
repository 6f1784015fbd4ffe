//! Tracing subscriber setup for hosts embedding the view.

/// Installs a global `tracing` subscriber.
///
/// Honors `RUST_LOG`. Without it, only errors are shown, plus info-level
/// events from this crate. Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    #[cfg(target_os = "android")]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(default_filter())
            .with_ansi(false)
            .try_init();
    }

    #[cfg(not(target_os = "android"))]
    {
        let _ = tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(default_filter())
            .try_init();
    }
}

fn default_filter() -> tracing_subscriber::EnvFilter {
    match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,tessera_textbox_view=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    }
}
