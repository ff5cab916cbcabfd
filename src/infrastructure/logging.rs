//! Tracing setup shared by the desktop and command-line binaries.

use crossbeam_channel::{Receiver, Sender};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info";

// A writer that sends formatted log lines to the UI log panel
pub struct ChannelWriter {
    sender: Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).trim_end().to_string();
        if !msg.is_empty() {
            // The panel may be gone during shutdown; dropping the line is fine
            let _ = self.sender.try_send(msg);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
pub struct ChannelWriterFactory {
    sender: Sender<String>,
}

impl ChannelWriterFactory {
    pub fn new(sender: Sender<String>) -> Self {
        Self { sender }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn ui_subscriber(
    filter: EnvFilter,
    log_tx: Sender<String>,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory::new(log_tx))
        .with_ansi(false) // No color codes for UI text
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(ui_layer)
}

/// Stdout plus a channel feeding the UI log panel. Returns the receiving end.
pub fn init_with_ui_channel() -> Receiver<String> {
    let (log_tx, log_rx) = crossbeam_channel::unbounded();
    let _ = ui_subscriber(env_filter(), log_tx).try_init();
    log_rx
}

/// Stderr only, so command output on stdout stays machine-readable.
pub fn init_cli(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        env_filter()
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
