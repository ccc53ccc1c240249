//! A terminal login form: type an email and password, submit them to a login
//! server, and land on the main page (or get told the credentials are wrong).

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

use app::{App, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use login_core::Client;
use ratatui::DefaultTerminal;
use std::{io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    // The terminal belongs to the UI, so logs go to a file instead. Keep the
    // guard alive until exit so buffered lines get flushed.
    let _guard = init_tracing(&config)?;
    tracing::info!(server = %config.server, "starting");

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, Arc::new(config)).await;
    ratatui::restore();
    res
}

/// Send `tracing` output to a daily log file in the configured directory.
fn init_tracing(config: &config::Config) -> io::Result<WorkerGuard> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, "login_form.log"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, config: Arc<config::Config>) -> io::Result<ExitCode> {
    let mut app = App::new(Client::new(config.server.clone()));
    let conn = Arc::new(EffectContext::new(&config));

    // Side-effectful behaviors (here, login requests) take place in async
    // tasks. Once those tasks are done, we read their results off of a
    // channel. We keep track of outstanding effects so we can stop them when
    // we exit.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects: Vec<JoinHandle<()>> = Vec::new();

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    loop {
        // Wait for either external input or the result of an effect. This is
        // an `Option<_>` because we don't need to pay attention to every
        // single terminal event (resizes just redraw.)
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => {
                effect_opt
            }
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&conn),
                    effect,
                ));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        outstanding_effects.retain(|handle| !handle.is_finished());

        // Login requests have no timeout, so we can't wait for them to finish
        // before exiting. Nothing depends on their results once we're gone.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                effect.abort();
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    conn: Arc<EffectContext>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run(&conn).await {
            // The receiver only goes away when we're shutting down, at which
            // point nobody needs the result.
            let _ = effect_tx.send(next_action);
        }
    })
}
