use ratatui::Frame;

use crate::{
    ui::{render_game_over, render_home, render_how_to_play, render_playing},
    App, AppState,
};

/// A UI screen boundary: one per app state.
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_home(app, f);
    }
}

pub struct HowToPlayScreen;

impl Screen for HowToPlayScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_how_to_play(app, f);
    }
}

/// Sentence, chamber strip and timer; draws the pause overlay on top when paused.
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_playing(app, f);
    }
}

pub struct GameOverScreen;

impl Screen for GameOverScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_game_over(app, f);
    }
}

pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Home => Box::new(HomeScreen),
        AppState::HowToPlay => Box::new(HowToPlayScreen),
        AppState::Playing => Box::new(PlayingScreen),
        AppState::GameOver => Box::new(GameOverScreen),
    }
}
