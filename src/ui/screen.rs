use ratatui::Frame;
use speedy::clock::{Clock, Randomness};

use crate::{ui::about::render_about, App, AppState};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen<C: Clock, R: Randomness> {
    fn render(&self, app: &App<C, R>, f: &mut Frame);
}

/// Game screen - renders the reaction timer using the App widget
pub struct GameScreen;

impl<C: Clock, R: Randomness> Screen<C, R> for GameScreen {
    fn render(&self, app: &App<C, R>, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

pub struct AboutScreen;

impl<C: Clock, R: Randomness> Screen<C, R> for AboutScreen {
    fn render(&self, _app: &App<C, R>, f: &mut Frame) {
        render_about(f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen<C: Clock, R: Randomness>(state: &AppState) -> Box<dyn Screen<C, R>> {
    match state {
        AppState::Game => Box::new(GameScreen),
        AppState::About => Box::new(AboutScreen),
    }
}
