use super::app::InteractiveApp;
use super::event::{Event, EventHandler};
use crate::cli_context::CliContext;
use crate::error::{ConsoleError, ConsoleResult};
use crate::logging::{log_debug, log_error, log_info};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

type ConsoleTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run_interactive_mode(context: &CliContext) -> ConsoleResult<()> {
    log_info(&format!("Starting interactive mode against {}", context.base_url()));

    let console = context.console()?;
    let mut app = InteractiveApp::new(console, context.default_username().map(String::from));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    log_debug("Terminal initialized");

    // The loop blocks on terminal input; keep it off the async scheduler.
    let result = tokio::task::block_in_place(|| event_loop(&mut terminal, &mut app));

    // Restore terminal even when the loop failed
    let restored = restore_terminal(&mut terminal);
    log_info("Exiting interactive mode");

    result.and(restored)
}

fn event_loop(terminal: &mut ConsoleTerminal, app: &mut InteractiveApp) -> ConsoleResult<()> {
    app.mount();
    let events = EventHandler::new(100);

    loop {
        if let Err(e) = terminal.draw(|f| super::ui::draw(f, app)) {
            log_error(&format!("Error drawing UI: {}", e));
            return Err(ConsoleError::TerminalError(e.to_string()));
        }

        let event = events
            .recv()
            .map_err(|e| ConsoleError::TerminalError(e.to_string()))?;

        match event {
            Event::Key(key_event) => {
                log_debug(&format!("Key pressed: {:?}, Screen: {:?}", key_event.code, app.screen()));
                app.handle_key(key_event);
            }
            Event::Resize | Event::Tick => {}
        }

        app.poll();

        if app.should_quit {
            return Ok(());
        }
    }
}

fn restore_terminal(terminal: &mut ConsoleTerminal) -> ConsoleResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
