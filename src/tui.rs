//! Terminal setup and teardown.
//!
//! Mouse capture is enabled so notes can be dismissed with a click.

use std::io::{self, Stdout};

use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

use crate::notify::Viewport;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switches to the alternate screen in raw mode and returns the terminal.
///
/// A panic hook is installed that restores the terminal before the panic
/// message is printed.
pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;

    set_panic_hook();

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    tracing::debug!("terminal initialized");
    Ok(terminal)
}

/// Current terminal size as a note viewport.
pub fn viewport(terminal: &Tui) -> io::Result<Viewport> {
    let size = terminal.size()?;
    Ok(Viewport::new(size.width, size.height))
}

fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        hook(panic_info);
    }));
}

/// Leaves the alternate screen and disables raw mode.
pub fn restore() -> io::Result<()> {
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    tracing::debug!("terminal restored");
    Ok(())
}
