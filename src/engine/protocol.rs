use crate::engine::controller::Outcome;
use crate::engine::error::StoryError;
use crate::model::player_state::PlayerState;
use crate::model::scene::Scene;

/// Sent from the UI thread to the engine thread.
#[derive(Debug)]
pub enum EngineCommand {
    /// Begin a fresh adventure (also used for "Play Again").
    StartGame,
    /// The player picked the choice at this index of the current scene.
    Choose(usize),
    /// Re-attempt the last failed generation.
    RetryTurn,
}

/// Sent from the engine thread back to the UI. Scenes and player state
/// travel as owned snapshots; the UI never touches engine internals.
#[derive(Debug)]
pub enum EngineResponse {
    SceneReady {
        scene: Scene,
        state: PlayerState,
    },
    GameOver {
        scene: Scene,
        state: PlayerState,
        outcome: Outcome,
    },
    TurnFailed {
        error: StoryError,
        retryable: bool,
    },
}
