use std::sync::mpsc;
use std::time::Duration;

use eframe::egui;
use rand::seq::SliceRandom;
use tracing::error;

use crate::engine::controller::Outcome;
use crate::engine::engine::Engine;
use crate::engine::error::StoryError;
use crate::engine::llm_client::GroqClient;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::player_state::PlayerState;

use super::{choice_panel, stats_panel, story_panel};

/// Shown next to the spinner while a turn is generating.
const LOADING_MESSAGES: [&str; 10] = [
    "🤔 The dungeon master is rolling dice...",
    "🐉 Consulting with the local dragons...",
    "🗡 Sharpening virtual swords...",
    "🧙 Brewing potions of creativity...",
    "📜 Consulting ancient scrolls...",
    "🎲 Rolling for initiative...",
    "🌟 Gathering magical energies...",
    "🏰 Exploring distant castles...",
    "⚔ Preparing epic encounters...",
    "🎭 Writing the next chapter...",
];

pub struct ErrorBanner {
    pub message: String,
    pub retryable: bool,
}

/// Everything the panels render. Updated only from engine responses and
/// local input handling; the UI never mutates game state directly.
#[derive(Default)]
pub struct ViewState {
    pub story: String,
    pub choices: Vec<String>,
    pub state: PlayerState,
    pub loading: bool,
    pub loading_message: String,
    pub outcome: Option<Outcome>,
    pub error: Option<ErrorBanner>,
    pub fatal: Option<String>,
}

pub struct AdventureApp {
    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
    pub(crate) view: ViewState,
}

impl AdventureApp {
    /// Spawns the engine thread and kicks off the opening turn. A client
    /// construction failure (missing API key) skips the engine entirely
    /// and shows a blocking error screen instead.
    pub fn new(client: Result<GroqClient, StoryError>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let mut app = Self {
            cmd_tx,
            resp_rx,
            view: ViewState::default(),
        };

        match client {
            Ok(client) => {
                std::thread::spawn(move || Engine::new(cmd_rx, resp_tx, client).run());
                app.send(EngineCommand::StartGame);
            }
            Err(err) => {
                error!(%err, "story client unavailable");
                app.view.fatal = Some(err.to_string());
            }
        }

        app
    }

    pub(crate) fn send(&mut self, cmd: EngineCommand) {
        self.view.error = None;
        self.view.loading = true;
        self.view.loading_message = LOADING_MESSAGES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(LOADING_MESSAGES[0])
            .to_string();

        if self.cmd_tx.send(cmd).is_err() {
            self.view.loading = false;
            self.view.fatal = Some("the story engine stopped unexpectedly".to_string());
        }
    }

    fn drain_responses(&mut self) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            self.view.loading = false;
            match resp {
                EngineResponse::SceneReady { scene, state } => {
                    self.view.story = scene.story;
                    self.view.choices = scene.choices.into_iter().map(|c| c.label).collect();
                    self.view.state = state;
                    self.view.outcome = None;
                }
                EngineResponse::GameOver {
                    scene,
                    state,
                    outcome,
                } => {
                    self.view.story = scene.story;
                    self.view.choices.clear();
                    self.view.state = state;
                    self.view.outcome = Some(outcome);
                }
                EngineResponse::TurnFailed { error, retryable } => {
                    if error.is_fatal() {
                        self.view.fatal = Some(error.to_string());
                    } else {
                        self.view.error = Some(ErrorBanner {
                            message: error.to_string(),
                            retryable,
                        });
                    }
                }
            }
        }
    }
}

impl eframe::App for AdventureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_responses();

        if let Some(message) = self.view.fatal.clone() {
            draw_fatal_screen(ctx, &message);
            return;
        }

        stats_panel::draw_stats_panel(ctx, &self.view);
        choice_panel::draw_choice_panel(ctx, self);
        story_panel::draw_story_panel(ctx, &self.view);

        // Keep polling the response channel while a turn is in flight.
        if self.view.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn draw_fatal_screen(ctx: &egui::Context, message: &str) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("⚠ The adventure cannot begin");
            ui.add_space(12.0);
            ui.label(message);
            ui.add_space(12.0);
            ui.label("Set GROQ_API_KEY (a .env file works too) and restart the game.");
        });
    });
}
