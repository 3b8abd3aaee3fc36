pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use speedy::{
    about::PROFILE,
    clock::{Clock, Randomness, SystemClock, ThreadRandomness},
    config::{Config, ConfigStore, FileConfigStore},
    history::History,
    logging,
    reaction::{ReactionTimer, StartOutcome, Status},
    runtime::{CrosstermEventSource, FixedTicker, Runner, SpeedyEvent},
    ClickOutcome, SpeedyError,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{debug, info, warn};
use webbrowser::Browser;

/// reaction-time game: wait for green, then click as fast as you can
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Wait for the countdown, then click (or press space) the moment the green area appears. Click too early and the round is lost."
)]
pub struct Cli {
    /// skip the 3-2-1 intro and go straight to the start screen
    #[clap(long)]
    skip_intro: bool,

    /// number of past results to list on the start screen
    #[clap(short = 'r', long)]
    recent: Option<usize>,

    /// event loop poll interval in milliseconds
    #[clap(short = 't', long)]
    tick_rate: Option<u64>,

    /// do not capture the mouse; use the space bar to click
    #[clap(long)]
    no_mouse: bool,

    /// read settings from this file instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// verbose logging to the log file
    #[clap(long)]
    debug: bool,
}

impl Cli {
    /// Layer command line flags over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if self.skip_intro {
            config.skip_intro = true;
        }
        if let Some(n) = self.recent {
            config.recent_results = n;
        }
        if let Some(ms) = self.tick_rate {
            config.tick_rate_ms = ms;
        }
        if self.no_mouse {
            config.mouse = false;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Game,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Continue,
    Redraw,
    Quit,
}

#[derive(Debug)]
pub struct App<C: Clock = SystemClock, R: Randomness = ThreadRandomness> {
    pub timer: ReactionTimer<C, R>,
    pub state: AppState,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        let timer = ReactionTimer::system(config.skip_intro);
        Self::with_timer(timer, config)
    }
}

impl<C: Clock, R: Randomness> App<C, R> {
    pub fn with_timer(timer: ReactionTimer<C, R>, config: Config) -> Self {
        Self {
            timer,
            state: AppState::Game,
            config,
        }
    }

    /// The single pointer action: starts a round from the start screen,
    /// otherwise goes to the timer as a click.
    pub fn on_click(&mut self) {
        if self.state != AppState::Game {
            return;
        }

        if self.timer.status() == Status::Ready {
            if let StartOutcome::Started { delay_ms } = self.timer.start() {
                debug!(delay_ms, "round started from pointer");
            }
            return;
        }

        match self.timer.click() {
            ClickOutcome::Measured { reaction_ms, .. } => {
                debug!(reaction_ms, "click measured");
            }
            ClickOutcome::TooEarly => debug!("click too early"),
            ClickOutcome::Ignored(status) => debug!(%status, "click ignored"),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }

        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Control::Quit;
        }

        match self.state {
            AppState::Game => match key.code {
                KeyCode::Char(' ') => self.on_click(),
                KeyCode::Enter => match self.timer.status() {
                    Status::Ready => {
                        self.timer.start();
                    }
                    Status::Result | Status::TooEarly => {
                        self.timer.reset();
                    }
                    _ => {}
                },
                KeyCode::Char('r') => {
                    self.timer.reset();
                }
                KeyCode::Char('a') => {
                    // a round in flight keeps its timers, so don't walk away from it
                    if !matches!(self.timer.status(), Status::Countdown | Status::Waiting) {
                        self.state = AppState::About;
                    }
                }
                _ => {}
            },
            AppState::About => match key.code {
                KeyCode::Char('a') | KeyCode::Char('b') | KeyCode::Backspace => {
                    self.state = AppState::Game;
                }
                KeyCode::Char(c) => {
                    if let Some(link) = PROFILE.link_for(c) {
                        if Browser::is_available() {
                            if let Err(e) = webbrowser::open(link.url) {
                                warn!(url = link.url, error = %e, "failed to open link");
                            }
                        }
                    }
                }
                _ => {}
            },
        }

        Control::Continue
    }

    /// Dispatch one runner event, then fire whatever timers are due.
    ///
    /// Timers are polled after every event rather than only on idle ticks,
    /// so a stream of input can't hold back the intro or the deadline.
    pub fn on_event(&mut self, event: SpeedyEvent) -> Control {
        let control = match event {
            SpeedyEvent::Tick => Control::Continue,
            SpeedyEvent::Resize => Control::Redraw,
            SpeedyEvent::Click => {
                self.on_click();
                Control::Redraw
            }
            SpeedyEvent::Key(key) => match self.on_key(key) {
                Control::Quit => return Control::Quit,
                _ => Control::Redraw,
            },
        };

        if self.timer.on_tick() {
            Control::Redraw
        } else {
            control
        }
    }

    pub fn into_history(self) -> History {
        self.timer.teardown()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.debug);

    let store = cli.config_store();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = ?store.path(), "config saved");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, SpeedyError::NotATty.to_string())
            .exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mouse = config.mouse;
    let mut app = App::new(config);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let history = app.into_history();
    info!(rounds = history.len(), best = ?history.best(), "session ended");

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::from_millis(app.config.tick_rate_ms),
    );

    terminal.draw(|f| ui::draw(&*app, f))?;

    loop {
        let wait = app.timer.until_next_timer().map(Duration::from_millis);
        match app.on_event(runner.step_within(wait)) {
            Control::Quit => break,
            Control::Redraw => {
                terminal.draw(|f| ui::draw(&*app, f))?;
            }
            Control::Continue => {}
        }
    }

    Ok(())
}
