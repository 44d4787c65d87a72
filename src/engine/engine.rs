use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, warn};

use crate::engine::controller::{TurnController, TurnUpdate};
use crate::engine::llm_client::StoryClient;
use crate::engine::protocol::{EngineCommand, EngineResponse};

/// The engine thread: receives commands from the UI, drives the turn
/// controller, and sends scene/state snapshots back. One command is
/// processed at a time, so turns can never overlap.
pub struct Engine<C: StoryClient> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    controller: TurnController<C>,
}

impl<C: StoryClient> Engine<C> {
    pub fn new(rx: Receiver<EngineCommand>, tx: Sender<EngineResponse>, client: C) -> Self {
        Self {
            rx,
            tx,
            controller: TurnController::new(client),
        }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            debug!(?cmd, "engine command");
            let result = match cmd {
                EngineCommand::StartGame => self.controller.start(),
                EngineCommand::Choose(index) => self.controller.choose(index),
                EngineCommand::RetryTurn => self.controller.retry(),
            };

            let response = match result {
                Ok(TurnUpdate::Scene(scene)) => EngineResponse::SceneReady {
                    scene,
                    state: self.controller.state().clone(),
                },
                Ok(TurnUpdate::Over { scene, outcome }) => EngineResponse::GameOver {
                    scene,
                    state: self.controller.state().clone(),
                    outcome,
                },
                Err(error) => {
                    warn!(%error, "turn failed");
                    EngineResponse::TurnFailed {
                        retryable: error.is_retryable(),
                        error,
                    }
                }
            };

            // A closed channel means the UI is gone; stop the thread.
            if self.tx.send(response).is_err() {
                break;
            }
        }
    }
}
