use tracing::{error, info, warn};

use crate::engine::error::StoryError;
use crate::engine::llm_client::StoryClient;
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::scene_parser::{parse_epilogue, parse_scene};
use crate::model::message::{trim_history, ChatMessage};
use crate::model::player_state::PlayerState;
use crate::model::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All steps completed with health remaining.
    Victory,
    /// Health hit zero.
    Death,
    /// The story service kept returning garbage; ended gracefully.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A generation is pending or has failed retryably.
    GeneratingTurn,
    /// A scene is on screen and the player owes us a choice.
    AwaitingChoice,
    /// No further turns are generated.
    Terminal(Outcome),
}

/// Result of driving the controller one step forward.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnUpdate {
    /// A new scene to present; the controller is awaiting a choice.
    Scene(Scene),
    /// The adventure is over; the scene carries the closing narrative.
    Over { scene: Scene, outcome: Outcome },
}

/// The turn state machine. Owns the player state and conversation history;
/// knows nothing about egui. Effects are applied exactly once per accepted
/// choice, so retrying a failed generation never double-counts them.
pub struct TurnController<C: StoryClient> {
    client: C,
    state: PlayerState,
    history: Vec<ChatMessage>,
    scene: Option<Scene>,
    phase: Phase,
}

impl<C: StoryClient> TurnController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: PlayerState::default(),
            history: Vec::new(),
            scene: None,
            phase: Phase::GeneratingTurn,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Begin (or restart) the adventure: fresh state, fresh history, and a
    /// generation of the opening scene with no player input.
    pub fn start(&mut self) -> Result<TurnUpdate, StoryError> {
        info!("starting a new adventure");
        self.state = PlayerState::default();
        self.history = PromptBuilder::opening_messages(&self.state);
        self.scene = None;
        self.phase = Phase::GeneratingTurn;
        self.generate_scene()
    }

    /// Accept the player's pick for the current scene, apply its effects,
    /// and generate the next turn (or a terminal scene).
    pub fn choose(&mut self, index: usize) -> Result<TurnUpdate, StoryError> {
        let scene = match (&self.phase, &self.scene) {
            (Phase::AwaitingChoice, Some(scene)) if index < scene.choices.len() => scene.clone(),
            _ => return Err(StoryError::InvalidChoice(index + 1)),
        };

        let choice = &scene.choices[index];
        self.state.apply(&choice.effects);
        info!(
            step = self.state.step,
            health = self.state.health,
            gold = self.state.gold,
            choice = index + 1,
            "choice accepted"
        );

        self.history
            .extend(PromptBuilder::choice_messages(&scene, index, &self.state));
        trim_history(&mut self.history);
        self.scene = None;
        self.phase = Phase::GeneratingTurn;

        if self.state.is_dead() {
            return Ok(self.finish(Outcome::Death, death_story(&self.state)));
        }
        if self.state.is_complete() {
            return Ok(self.finish_with_epilogue());
        }
        self.generate_scene()
    }

    /// Re-attempt whatever the last failed generation was. Idempotent when
    /// nothing is pending: the current scene is simply re-announced.
    pub fn retry(&mut self) -> Result<TurnUpdate, StoryError> {
        match (self.phase, &self.scene) {
            (Phase::GeneratingTurn, _) => self.generate_scene(),
            (Phase::AwaitingChoice, Some(scene)) => Ok(TurnUpdate::Scene(scene.clone())),
            (Phase::Terminal(outcome), Some(scene)) => Ok(TurnUpdate::Over {
                scene: scene.clone(),
                outcome,
            }),
            _ => self.generate_scene(),
        }
    }

    /// One generation from the current history, with a single silent
    /// regeneration when the completion does not parse. A second malformed
    /// completion ends the session gracefully; transport-level failures
    /// bubble up so the player can retry the same turn.
    fn generate_scene(&mut self) -> Result<TurnUpdate, StoryError> {
        let raw = self.client.complete(&self.history)?;
        let scene = match parse_scene(&raw) {
            Ok(scene) => scene,
            Err(first) => {
                warn!(error = %first, "malformed scene, regenerating once");
                let raw = self.client.complete(&self.history)?;
                match parse_scene(&raw) {
                    Ok(scene) => scene,
                    Err(second) => {
                        error!(error = %second, "regeneration was also malformed, ending session");
                        return Ok(self.finish(Outcome::Aborted, aborted_story(&self.state)));
                    }
                }
            }
        };

        self.scene = Some(scene.clone());
        self.phase = Phase::AwaitingChoice;
        Ok(TurnUpdate::Scene(scene))
    }

    /// Ask the model for a closing scene; fall back to a fixed summary if
    /// that fails for any reason. Either way the game ends in victory.
    fn finish_with_epilogue(&mut self) -> TurnUpdate {
        self.history.push(PromptBuilder::epilogue_message(&self.state));
        trim_history(&mut self.history);

        let story = self
            .client
            .complete(&self.history)
            .and_then(|raw| parse_epilogue(&raw))
            .unwrap_or_else(|e| {
                warn!(error = %e, "epilogue generation failed, using final stats summary");
                victory_story(&self.state)
            });

        self.finish(Outcome::Victory, story)
    }

    fn finish(&mut self, outcome: Outcome, story: String) -> TurnUpdate {
        info!(?outcome, step = self.state.step, "adventure over");
        let scene = Scene::terminal(story);
        self.scene = Some(scene.clone());
        self.phase = Phase::Terminal(outcome);
        TurnUpdate::Over { scene, outcome }
    }
}

fn final_stats(state: &PlayerState) -> String {
    format!(
        "Final Stats:\nHealth: {}\nGold: {}\nInventory: {}",
        state.health,
        state.gold,
        state.inventory_summary()
    )
}

fn death_story(state: &PlayerState) -> String {
    format!(
        "You have perished in your quest!\n\n{}",
        final_stats(state)
    )
}

fn victory_story(state: &PlayerState) -> String {
    format!(
        "Your epic journey has reached its conclusion...\n\n\
         As you reflect on your adventures, you realize how far you've come.\n\n{}",
        final_stats(state)
    )
}

fn aborted_story(state: &PlayerState) -> String {
    format!(
        "A mysterious force disrupts your adventure...\n\n\
         The ancient scrolls have become illegible, but your journey was still \
         a memorable one!\n\n{}",
        final_stats(state)
    )
}
