use std::io::{self, Stdout};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use gamestore_lite::{App, Config, Dispatcher, MySqlExecutor, ProcedureExecutor, logger, ui};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logger::init_logger(&config)?;
    log::info!("starting GameStoreLite");

    let executor = MySqlExecutor::connect_lazy(&config.db)?;
    let mut app = App::new(Dispatcher::new(executor));

    enable_raw_mode()?;
    let mut terminal = enter_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        disable_raw_mode,
    )?;

    let res = run_app(&mut terminal, &mut app);

    // restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("terminal error: {}", err);
        return Err(err.into());
    }

    log::info!("window closed");
    Ok(())
}

/// Runs `enter` once raw mode is on; if it fails, `restore` puts the terminal
/// back before the error is returned.
fn enter_or_restore<T>(
    enter: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    enter().inspect_err(|_| {
        if let Err(e) = restore() {
            log::error!("failed to restore terminal: {}", e);
        }
    })
}

/// Every database call runs inside `handle_key`, so a slow server stalls the
/// loop until it answers.
fn run_app<X: ProcedureExecutor>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<X>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
