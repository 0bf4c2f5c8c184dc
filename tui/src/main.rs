use std::{
    io,
    sync::mpsc::Receiver,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tasklist_core::TodoClient;
use tracing::{error, info};

mod cli;
mod commands;
mod config;
mod input;
mod logging;
mod transport;
mod ui;

use config::Config;
use input::{Action, Screen};
use transport::{Completion, Dispatcher, Transport};

const TICK_RATE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = Config::load(&cli);
    let client = TodoClient::new(&config.base_url);
    let transport = Transport::new(config.timeout);

    if let Some(command) = cli.command {
        logging::init_stderr(&config.log_level);
        config.log();
        return commands::run(command, &client, &transport);
    }

    logging::init_file(&config.log_file, &config.log_level)?;
    config.log();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let (dispatcher, completions) = Dispatcher::new(transport, client);
    let res = run_app(&mut terminal, &dispatcher, &completions);

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("UI loop failed: {err:#}");
    }
    info!("exiting");
    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    dispatcher: &Dispatcher,
    completions: &Receiver<Completion>,
) -> Result<()> {
    let mut screen = Screen::default();
    dispatcher.dispatch(screen.app.load());

    loop {
        while let Ok((call, result)) = completions.try_recv() {
            screen.app.apply(call, result, Instant::now());
        }
        screen.app.tick(Instant::now());

        terminal.draw(|f| ui::draw(f, &screen))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match input::handle_key(&mut screen, key) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::Dispatch(call)) => dispatcher.dispatch(call),
                None => {}
            }
        }
    }
}
