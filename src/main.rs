mod ui;

use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    sync::Mutex,
    time::Duration,
};

use chrono::Utc;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use typoslinger::{
    app_dirs::AppDirs,
    audio::{AudioCues, TerminalBell},
    clipboard::{copy_share_text, ClipboardWriter, ShareNotice, SystemClipboard},
    config::{Config, ConfigStore, FileConfigStore},
    hint::{HintController, HintError},
    i18n::Key,
    runtime::{CrosstermEventSource, Runner, SlingerEvent},
    share::ShareTextFormatter,
    stats::{DailyResultsDb, ResultStore},
    util::{daily_date, daily_key},
    ClickOutcome, EngineEvent, GameSummary, Language, RoundEngine, SentenceBank,
};

use crate::ui::screen::current_screen;

/// How long transient notices (copy result, hint refused) stay on screen.
const NOTICE_TTL: Duration = Duration::from_millis(2500);

/// quick-draw spelling game: shoot the misspelled word in each sentence
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Six sentences, six typos. Pick out the misspelled word in each one as fast as you can, with one hint per round if you need it."
)]
pub struct Cli {
    /// language for sentences and messages (defaults to the saved setting)
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// play sound cues (terminal bell)
    #[clap(short = 'a', long)]
    audio: bool,

    /// seed for hint sampling, for reproducible games
    #[clap(long)]
    seed: Option<u64>,

    /// do not record today's result
    #[clap(long)]
    no_save: bool,

    /// event loop tick interval in milliseconds
    #[clap(long)]
    tick_rate_ms: Option<u64>,
}

impl Cli {
    /// Merge CLI overrides on top of the stored config. The result is for this
    /// run only and is never written back.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(lang) = self.language {
            config.language = lang.code().to_string();
        }
        if self.audio {
            config.audio_enabled = true;
        }
        if self.no_save {
            config.save_results = false;
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms.max(1);
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    HowToPlay,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub key: Key,
    pub remaining: Duration,
}

pub struct App {
    /// Settings for this run: stored config plus CLI overrides.
    pub config: Config,
    /// What gets written back on exit; only home-screen toggles change it.
    pub stored: Config,
    pub seed: Option<u64>,
    pub bank: SentenceBank,
    pub engine: Option<RoundEngine>,
    pub state: AppState,
    pub previous_state: AppState,
    /// Set when opening help paused the game, so closing help resumes it.
    pub help_paused: bool,
    pub cursor: usize,
    pub notice: Option<Notice>,
    pub summary: Option<GameSummary>,
    pub streak: Option<u32>,
    pub store: Option<Box<dyn ResultStore>>,
    pub clipboard: Box<dyn ClipboardWriter>,
}

impl App {
    pub fn new(stored: Config, cli: &Cli) -> Result<Self, typoslinger::GameError> {
        Ok(Self {
            config: cli.apply_to(stored.clone()),
            stored,
            seed: cli.seed,
            bank: SentenceBank::load()?,
            engine: None,
            state: AppState::Home,
            previous_state: AppState::Home,
            help_paused: false,
            cursor: 0,
            notice: None,
            summary: None,
            streak: None,
            store: None,
            clipboard: Box::new(SystemClipboard),
        })
    }

    pub fn language(&self) -> Language {
        self.config.language()
    }

    pub fn start_game(&mut self) -> Result<(), typoslinger::GameError> {
        let language = self.language();
        let hints = match self.seed {
            Some(seed) => HintController::seeded(seed),
            None => HintController::from_entropy(),
        };
        let audio = AudioCues::new(Box::new(TerminalBell), self.config.audio_enabled);
        let sentences = self.bank.for_language(language).to_vec();

        self.engine = Some(RoundEngine::new(language, sentences, hints)?.with_audio(audio));
        self.summary = None;
        self.cursor = 0;
        self.notice = None;
        self.state = AppState::Playing;
        Ok(())
    }

    fn show_notice(&mut self, key: Key) {
        self.notice = Some(Notice {
            key,
            remaining: NOTICE_TTL,
        });
    }

    /// Advances game time and reacts to engine events
    pub fn on_step(&mut self, dt: Duration) {
        if let Some(notice) = self.notice.as_mut() {
            notice.remaining = notice.remaining.saturating_sub(dt);
            if notice.remaining.is_zero() {
                self.notice = None;
            }
        }

        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        for event in engine.advance(dt) {
            match event {
                EngineEvent::RoundStarted { .. } => self.cursor = 0,
                EngineEvent::GameComplete(summary) => self.finish(summary),
                _ => {}
            }
        }
    }

    fn finish(&mut self, summary: GameSummary) {
        let now = Utc::now();
        if self.config.save_results {
            if let Some(store) = self.store.as_mut() {
                match store.record(&daily_key(&now), &summary.daily_record()) {
                    Ok(()) => self.streak = store.streak_ending(daily_date(&now)).ok(),
                    Err(e) => tracing::warn!(error = %e, "could not save daily result"),
                }
            }
        }
        self.summary = Some(summary);
        self.state = AppState::GameOver;
    }

    pub fn share_text(&self) -> Option<String> {
        let summary = self.summary.as_ref()?;
        let formatter = ShareTextFormatter::for_date(daily_date(&Utc::now()));
        Some(formatter.format(summary, self.language().code()))
    }

    fn share(&mut self) {
        if let Some(text) = self.share_text() {
            let notice = copy_share_text(self.clipboard.as_mut(), &text);
            self.show_notice(match notice {
                ShareNotice::Copied => Key::Copied,
                ShareNotice::CopyFailed => Key::CopyFailed,
            });
        }
    }

    fn toggle_audio(&mut self) {
        self.config.audio_enabled = !self.config.audio_enabled;
        self.stored.audio_enabled = self.config.audio_enabled;
        if let Some(engine) = self.engine.as_mut() {
            engine.audio_mut().set_enabled(self.config.audio_enabled);
        }
    }

    fn move_cursor(&mut self, forward: bool) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let count = engine.current_sentence().map_or(0, |s| s.token_count());
        if count == 0 {
            return;
        }
        // Skip words a hint has ruled out
        let mut next = self.cursor;
        for _ in 0..count {
            next = if forward {
                (next + 1) % count
            } else {
                (next + count - 1) % count
            };
            if engine.session().hint.is_clickable(next) {
                break;
            }
        }
        self.cursor = next;
    }

    fn shoot(&mut self, index: usize) {
        if let Some(engine) = self.engine.as_mut() {
            if let ClickOutcome::Accepted { .. } = engine.submit_word_click(index) {
                self.cursor = index;
            }
        }
    }

    fn hint(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.request_hint() {
            Ok(eligible) => {
                if !eligible.contains(&self.cursor) {
                    self.cursor = eligible.first().copied().unwrap_or(0);
                }
            }
            Err(HintError::AlreadyActive) => self.show_notice(Key::HintAlreadyUsed),
            Err(e) => tracing::debug!(error = %e, "hint refused"),
        }
    }

    /// Handles a key press; returns true when the app should exit
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.state {
            AppState::Home => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return true,
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Err(e) = self.start_game() {
                        tracing::error!(error = %e, "could not start game");
                        return true;
                    }
                }
                KeyCode::Char('l') => {
                    let code = self.language().next().code().to_string();
                    self.stored.language = code.clone();
                    self.config.language = code;
                }
                KeyCode::Char('a') => self.toggle_audio(),
                KeyCode::Char('?') => {
                    self.previous_state = AppState::Home;
                    self.state = AppState::HowToPlay;
                }
                _ => {}
            },
            AppState::HowToPlay => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.state = self.previous_state;
                    if self.help_paused {
                        self.help_paused = false;
                        if let Some(engine) = self.engine.as_mut() {
                            engine.resume();
                        }
                    }
                }
                _ => {}
            },
            AppState::Playing => {
                let paused = self.engine.as_ref().is_some_and(RoundEngine::is_paused);
                match key.code {
                    KeyCode::Esc => {
                        if let Some(engine) = self.engine.as_mut() {
                            engine.abandon();
                        }
                        self.engine = None;
                        self.state = AppState::Home;
                    }
                    KeyCode::Char('p') | KeyCode::Char(' ') => {
                        if let Some(engine) = self.engine.as_mut() {
                            engine.toggle_pause();
                        }
                    }
                    KeyCode::Char('a') => self.toggle_audio(),
                    _ if paused => {}
                    KeyCode::Char('?') => {
                        if let Some(engine) = self.engine.as_mut() {
                            engine.pause();
                            self.help_paused = engine.is_paused();
                        }
                        self.previous_state = AppState::Playing;
                        self.state = AppState::HowToPlay;
                    }
                    KeyCode::Left => self.move_cursor(false),
                    KeyCode::Right | KeyCode::Tab => self.move_cursor(true),
                    KeyCode::Enter => self.shoot(self.cursor),
                    KeyCode::Char('h') => self.hint(),
                    KeyCode::Char(c @ '1'..='9') => {
                        let index = c as usize - '1' as usize;
                        self.shoot(index);
                    }
                    _ => {}
                }
            }
            AppState::GameOver => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return true,
                KeyCode::Char('c') | KeyCode::Char('s') => self.share(),
                KeyCode::Char('n') | KeyCode::Enter => {
                    self.engine = None;
                    self.state = AppState::Home;
                }
                _ => {}
            },
        }
        false
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_file = AppDirs::log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(&path).ok()
    });

    // Never log to the terminal: it would corrupt the TUI
    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init(),
        None => tracing_subscriber::registry().with(env_filter).init(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_tracing();

    let config_store = FileConfigStore::new();
    let mut app = App::new(config_store.load(), &cli)?;
    let tick = Duration::from_millis(app.config.tick_rate_ms);

    if app.config.save_results {
        match DailyResultsDb::new() {
            Ok(db) => {
                app.streak = db.streak_ending(daily_date(&Utc::now())).ok();
                app.store = Some(Box::new(db));
            }
            Err(e) => tracing::warn!(error = %e, "results database unavailable"),
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, tick);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = config_store.save(&app.stored) {
        tracing::warn!(error = %e, "could not save config");
    }

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), tick);

    loop {
        terminal.draw(|f| ui(app, f))?;

        let (event, dt) = runner.step();
        app.on_step(dt);
        match event {
            SlingerEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
            }
            SlingerEvent::Resize | SlingerEvent::Tick => {}
        }
    }

    if let Some(engine) = app.engine.as_mut() {
        engine.abandon();
    }
    Ok(())
}

fn ui(app: &mut App, f: &mut ratatui::Frame) {
    current_screen(&app.state).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::RefCell;
    use std::rc::Rc;
    use typoslinger::summary::DailyRecord;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        let cli = Cli::parse_from(["typoslinger", "--no-save", "--seed", "11"]);
        App::new(Config::default(), &cli).unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<Vec<(String, DailyRecord)>>>);

    impl ResultStore for SharedStore {
        fn record(&mut self, date: &str, record: &DailyRecord) -> typoslinger::error::Result<()> {
            self.0.borrow_mut().push((date.to_string(), *record));
            Ok(())
        }
        fn get(&self, _date: &str) -> typoslinger::error::Result<Option<DailyRecord>> {
            Ok(None)
        }
    }

    #[derive(Clone, Default)]
    struct SharedClipboard(Rc<RefCell<Option<String>>>);

    impl ClipboardWriter for SharedClipboard {
        fn write_text(&mut self, text: &str) -> typoslinger::error::Result<()> {
            *self.0.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    /// Shoots the misspelled word of the current round and waits out the feedback.
    fn play_round_correctly(app: &mut App) {
        let index = app
            .engine
            .as_ref()
            .and_then(|e| e.current_sentence())
            .and_then(|s| s.misspelled_index())
            .unwrap();
        app.cursor = index;
        app.on_key(key(KeyCode::Enter));
        app.on_step(Duration::from_millis(2300));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["typoslinger"]);
        assert_eq!(cli.language, None);
        assert!(!cli.audio);
        assert_eq!(cli.seed, None);
        assert!(!cli.no_save);
    }

    #[test]
    fn test_cli_language_and_aliases() {
        let cli = Cli::parse_from(["typoslinger", "-l", "es"]);
        assert_eq!(cli.language, Some(Language::Spanish));
        let cli = Cli::parse_from(["typoslinger", "--language", "english"]);
        assert_eq!(cli.language, Some(Language::English));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "typoslinger",
            "-l",
            "es",
            "--audio",
            "--no-save",
            "--tick-rate-ms",
            "0",
        ]);
        let config = cli.apply_to(Config::default());
        assert_eq!(config.language(), Language::Spanish);
        assert!(config.audio_enabled);
        assert!(!config.save_results);
        assert_eq!(config.tick_rate_ms, 1);
    }

    #[test]
    fn test_cli_flags_are_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));

        let once = Cli::parse_from(["typoslinger", "--no-save", "--audio", "-l", "es"]);
        let app = App::new(store.load(), &once).unwrap();
        assert!(!app.config.save_results);
        assert!(app.config.audio_enabled);
        assert_eq!(app.language(), Language::Spanish);
        store.save(&app.stored).unwrap();

        let plain = Cli::parse_from(["typoslinger"]);
        let app = App::new(store.load(), &plain).unwrap();
        assert!(app.config.save_results);
        assert!(!app.config.audio_enabled);
        assert_eq!(app.language(), Language::English);
    }

    #[test]
    fn test_home_toggles_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));

        let mut app = test_app();
        app.on_key(key(KeyCode::Char('l')));
        app.on_key(key(KeyCode::Char('a')));
        store.save(&app.stored).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.language(), Language::Spanish);
        assert!(loaded.audio_enabled);
        // --no-save from the first run stays out of the file
        assert!(loaded.save_results);
    }

    #[test]
    fn test_closing_help_resumes_game() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::HowToPlay);
        assert!(app.engine.as_ref().unwrap().is_paused());

        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Playing);
        assert!(!app.engine.as_ref().unwrap().is_paused());
        assert!(!app.help_paused);
    }

    #[test]
    fn test_help_from_home_does_not_touch_pause() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('?')));
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Home);
        assert!(!app.help_paused);
    }

    #[test]
    fn test_home_language_toggle() {
        let mut app = test_app();
        assert_eq!(app.language(), Language::English);
        app.on_key(key(KeyCode::Char('l')));
        assert_eq!(app.language(), Language::Spanish);
        app.on_key(key(KeyCode::Char('l')));
        assert_eq!(app.language(), Language::English);
    }

    #[test]
    fn test_how_to_play_returns_to_previous_screen() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::HowToPlay);
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Home);
    }

    #[test]
    fn test_full_game_through_keys() {
        let mut app = test_app();
        let store = SharedStore::default();
        app.config.save_results = true;
        app.store = Some(Box::new(store.clone()));

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Playing);

        for _ in 0..6 {
            play_round_correctly(&mut app);
        }

        assert_eq!(app.state, AppState::GameOver);
        let summary = app.summary.clone().unwrap();
        assert_eq!(summary.hits, 6);
        assert_eq!(summary.misses, 0);
        assert_eq!(store.0.borrow().len(), 1);
        assert_eq!(store.0.borrow()[0].1, summary.daily_record());
    }

    #[test]
    fn test_share_copies_text_and_shows_notice() {
        let mut app = test_app();
        let clipboard = SharedClipboard::default();
        app.clipboard = Box::new(clipboard.clone());
        app.on_key(key(KeyCode::Enter));
        for _ in 0..6 {
            play_round_correctly(&mut app);
        }

        app.on_key(key(KeyCode::Char('c')));
        let copied = clipboard.0.borrow().clone().unwrap();
        assert!(copied.starts_with("Typoslinger #"));
        assert!(copied.contains("🎯 6 Hits"));
        assert_eq!(app.notice.map(|n| n.key), Some(Key::Copied));

        app.on_step(NOTICE_TTL);
        assert_eq!(app.notice, None);
    }

    #[test]
    fn test_second_hint_shows_notice() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('h')));
        assert!(app.notice.is_none());
        app.on_key(key(KeyCode::Char('h')));
        assert_eq!(app.notice.map(|n| n.key), Some(Key::HintAlreadyUsed));
        assert_eq!(app.engine.as_ref().unwrap().session().hints_used, 1);
    }

    #[test]
    fn test_cursor_skips_words_ruled_out_by_hint() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('h')));
        let eligible = app.engine.as_ref().unwrap().session().hint.eligible.clone();
        for _ in 0..10 {
            app.on_key(key(KeyCode::Right));
            assert!(eligible.contains(&app.cursor));
        }
    }

    #[test]
    fn test_paused_game_ignores_shots() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('p')));
        app.on_key(key(KeyCode::Char('1')));
        let engine = app.engine.as_ref().unwrap();
        assert!(engine.is_paused());
        assert!(!engine.is_resolving());
    }

    #[test]
    fn test_esc_abandons_to_home() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('1')));
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Home);
        assert!(app.engine.is_none());
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = test_app();
        let ctrl_c = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert!(app.on_key(ctrl_c));
    }

    #[test]
    fn test_ui_renders_every_screen() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| ui(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("TypoSlinger"));

        app.on_key(key(KeyCode::Char('?')));
        terminal.draw(|f| ui(&mut app, f)).unwrap();
        app.on_key(key(KeyCode::Esc));

        app.on_key(key(KeyCode::Enter));
        terminal.draw(|f| ui(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("cowboy"));

        app.on_key(key(KeyCode::Char('p')));
        terminal.draw(|f| ui(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("Game paused"));
        app.on_key(key(KeyCode::Char('p')));

        for _ in 0..6 {
            play_round_correctly(&mut app);
        }
        terminal.draw(|f| ui(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("6/6"));
    }

    #[test]
    fn test_ui_renders_correction_during_feedback() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        app.on_key(key(KeyCode::Enter));
        app.cursor = 2;
        app.on_key(key(KeyCode::Enter));
        app.on_step(Duration::from_millis(1300));

        terminal.draw(|f| ui(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("rode"));
    }
}
