pub mod config;
pub mod diff;
pub mod meter;
pub mod runtime;
pub mod samples;
pub mod ui;
pub mod util;

use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::meter::Meter;
use crate::runtime::MeterEvent;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// live typing meter tui with diff-based accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A live typing meter: type the shown text while elapsed seconds, chars per minute, and diff-based accuracy update in place, with a speed-over-time chart once you finish."
)]
pub struct Cli {
    /// custom reference text to type instead of a built-in sample
    #[clap(short = 'r', long)]
    reference: Option<String>,

    /// metrics refresh interval in milliseconds
    #[clap(short = 't', long)]
    tick_ms: Option<u64>,

    /// allow backspace while typing (off by default, every keystroke counts)
    #[clap(long)]
    backspace: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub reference: String,
    pub typed: String,
    pub meter: Meter,
    pub state: AppState,
    pub config: Config,
    /// (elapsed_secs, chars_per_min) per tick, for the results chart.
    pub history: Vec<(f64, f64)>,
}

impl App {
    pub fn new(cli: Cli, config: Config) -> Self {
        let reference = cli.reference.unwrap_or_else(samples::random_sample);

        Self {
            meter: Meter::new(reference.clone()),
            reference,
            typed: String::new(),
            state: AppState::Typing,
            config,
            history: vec![],
        }
    }

    /// Append a typed character and push the snapshot into the meter. On the
    /// completing keystroke the final reading lands in the history and the
    /// app flips to the results screen.
    pub fn type_char(&mut self, c: char, now: Instant) {
        if self.meter.has_finished() {
            return;
        }
        self.typed.push(c);
        if let Some(reading) = self.meter.observe(&self.typed, &self.reference, now) {
            self.history
                .push((reading.elapsed_secs, reading.chars_per_min));
            self.state = AppState::Results;
        }
    }

    pub fn backspace(&mut self, now: Instant) {
        if !self.config.allow_backspace || self.meter.has_finished() {
            return;
        }
        self.typed.pop();
        self.meter.observe(&self.typed, &self.reference, now);
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(reading) = self.meter.tick(now) {
            self.history
                .push((reading.elapsed_secs, reading.chars_per_min));
        }
    }

    /// Start over: `Some` restarts with the given text, `None` rolls a fresh
    /// sample. Typed text and chart history are cleared either way.
    pub fn reset(&mut self, new_reference: Option<String>) {
        let reference =
            new_reference.unwrap_or_else(|| samples::random_sample_excluding(&self.reference));
        self.typed.clear();
        self.history.clear();
        self.meter = Meter::new(reference.clone());
        self.reference = reference;
        self.state = AppState::Typing;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if !store.path().exists() {
        let _ = store.save(&config);
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if cli.backspace {
        config.allow_backspace = true;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli, config);
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Debug)]
enum ExitType {
    Restart,
    New,
    Quit,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let meter_events = get_meter_events(app.config.tick_ms.max(1));

    loop {
        let mut exit_type: ExitType = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            match meter_events.recv()? {
                MeterEvent::Tick => {
                    // The timer only reaches the meter while a session is
                    // running; after finish or reset the ticks stop here.
                    if app.meter.is_running() {
                        app.on_tick(Instant::now());
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                MeterEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                MeterEvent::Key(key) => {
                    match key.code {
                        KeyCode::Esc => {
                            break;
                        }
                        KeyCode::Backspace => {
                            if app.state == AppState::Typing {
                                app.backspace(Instant::now());
                            }
                        }
                        KeyCode::Left => {
                            exit_type = ExitType::Restart;
                            break;
                        }
                        KeyCode::Right => {
                            exit_type = ExitType::New;
                            break;
                        }
                        KeyCode::Char(c) => {
                            if key.modifiers.contains(KeyModifiers::CONTROL)
                                && key.code == KeyCode::Char('c')
                            // ctrl+c to quit
                            {
                                break;
                            }

                            match app.state {
                                AppState::Typing => {
                                    app.type_char(c, Instant::now());
                                }
                                AppState::Results => match key.code {
                                    KeyCode::Char('r') => {
                                        exit_type = ExitType::Restart;
                                        break;
                                    }
                                    KeyCode::Char('n') => {
                                        exit_type = ExitType::New;
                                        break;
                                    }
                                    _ => {}
                                },
                            }
                        }
                        _ => {}
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Restart => {
                app.reset(Some(app.reference.clone()));
            }
            ExitType::New => {
                app.reset(None);
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}

fn get_meter_events(tick_ms: u64) -> mpsc::Receiver<MeterEvent> {
    let (tx, rx) = mpsc::channel();

    let tick_tx = tx.clone();
    thread::spawn(move || loop {
        if tick_tx.send(MeterEvent::Tick).is_err() {
            break;
        }

        thread::sleep(Duration::from_millis(tick_ms))
    });

    thread::spawn(move || loop {
        let evt = match event::read() {
            Ok(Event::Key(key)) => Some(MeterEvent::Key(key)),
            Ok(Event::Resize(_, _)) => Some(MeterEvent::Resize),
            Ok(_) => None,
            Err(_) => break,
        };

        if let Some(evt) = evt {
            if tx.send(evt).is_err() {
                break;
            }
        }
    });

    rx
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
