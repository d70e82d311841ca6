//! Runtime: terminal lifecycle, event loop, and effect execution.
//!
//! Responsibilities
//! - Own the terminal (enter/leave alternate screen, raw mode).
//! - Drive a single `tokio::select!` loop over input, fetch completions,
//!   and Ctrl+C.
//! - Route keys to the active component and execute returned `Effect`s.
//!
//! Input comes from a dedicated blocking thread: `crossterm::event::read()`
//! blocks on that thread and forwards events over a channel, keeping the
//! async loop free to await fetch completions. Fetches run as spawned
//! tasks; the `begin_fetch` guard on each view ensures at most one is in
//! flight per view, and completions land back here as [`Msg`]s.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, future::BoxFuture, stream::FuturesUnordered};
use mse_api::MseClient;
use mse_types::{Effect, FetchError, Msg, Route};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{signal, sync::mpsc};
use tracing::warn;

use crate::app::App;
use crate::components::MainView;

/// Spawn a dedicated thread that blocks on terminal input and forwards
/// events over a channel. Keeping `read()` off the async loop avoids lost
/// events in some terminals.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(100);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("failed to read terminal event: {error}");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Execute effects returned by components, queueing any follow-ups.
///
/// `FetchRequested` is gated on the view's `begin_fetch`: a request for a
/// view that is already Loading is dropped here, so no duplicate network
/// call is ever issued.
fn process_effects(
    app: &mut App,
    client: &MseClient,
    effects: Vec<Effect>,
    pending_fetches: &mut FuturesUnordered<BoxFuture<'static, Msg>>,
) {
    let mut queue = effects;
    while let Some(effect) = queue.pop() {
        match effect {
            Effect::SwitchTo(route) => {
                queue.extend(app.on_route_enter(route));
            }
            Effect::FetchRequested(route) => {
                if let Some(view) = app.view_mut(route)
                    && view.begin_fetch()
                {
                    let client = client.clone();
                    let endpoint = view.endpoint().to_string();
                    let task = tokio::spawn(async move { client.fetch_records(&endpoint).await });
                    // Remember the route outside the task: even if the
                    // task dies, its view must leave Loading again.
                    pending_fetches.push(Box::pin(async move {
                        match task.await {
                            Ok(result) => Msg::FetchCompleted { route, result },
                            Err(error) => fetch_task_failed(route, &error),
                        }
                    }));
                }
            }
            Effect::Quit => app.should_quit = true,
        }
    }
}

/// Completion message for a fetch task that died before producing a
/// result, so the view leaves Loading and stays retryable.
fn fetch_task_failed(route: Route, error: &impl std::fmt::Display) -> Msg {
    Msg::FetchCompleted {
        route,
        result: Err(FetchError::Network(format!("fetch task failed: {error}"))),
    }
}

fn apply_msg(app: &mut App, msg: Msg) {
    match msg {
        Msg::FetchCompleted { route, result } => {
            if let Some(view) = app.view_mut(route) {
                view.complete_fetch(result);
            }
        }
    }
}

/// Entry point for the TUI runtime: terminal setup, event loop, cleanup.
pub(crate) async fn run_app(client: MseClient) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;
    let mut app = App::new();
    let mut main_view = MainView::new();
    let mut pending_fetches: FuturesUnordered<BoxFuture<'static, Msg>> = FuturesUnordered::new();

    let initial = app.on_route_enter(Route::Home);
    process_effects(&mut app, &client, initial, &mut pending_fetches);
    render(&mut terminal, &mut app, &mut main_view)?;

    loop {
        let mut effects: Vec<Effect> = Vec::new();
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(Event::Key(key_event)) => {
                        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
                            break;
                        }
                        effects = main_view.handle_key_events(&mut app, key_event);
                    }
                    Some(_) => {} // Resize and the rest only need a redraw.
                    None => break, // Input thread gone; shut down cleanly.
                }
            }
            Some(msg) = pending_fetches.next(), if !pending_fetches.is_empty() => {
                apply_msg(&mut app, msg);
            }
            _ = signal::ctrl_c() => break,
        }

        process_effects(&mut app, &client, effects, &mut pending_fetches);
        app.collect_notices();
        if app.should_quit {
            break;
        }
        render(&mut terminal, &mut app, &mut main_view)?;
    }

    cleanup_terminal(&mut terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mse_types::FetchState;

    #[test]
    fn lost_fetch_task_unlocks_the_view_for_retry() {
        let mut app = App::new();
        assert!(app.issuers.begin_fetch());

        apply_msg(&mut app, fetch_task_failed(Route::Issuers, &"task cancelled"));

        assert!(matches!(app.issuers.state(), FetchState::Error(_)));
        app.collect_notices();
        assert!(app.notice.as_deref().is_some_and(|n| n.contains("task cancelled")));
        // Loading is over; the next trigger may issue a request again.
        assert!(app.issuers.begin_fetch());
    }

    #[test]
    fn completion_for_a_route_without_a_view_is_ignored() {
        let mut app = App::new();
        apply_msg(
            &mut app,
            Msg::FetchCompleted {
                route: Route::Home,
                result: Ok(Vec::new()),
            },
        );
        assert_eq!(*app.issuers.state(), FetchState::Idle);
    }
}
