use crate::model::message::ChatMessage;
use crate::model::player_state::{PlayerState, MAX_STEPS};
use crate::model::scene::Scene;

/// Fixed dungeon-master instruction. The envelope description must stay in
/// sync with the scene parser's wire schema.
const SYSTEM_PROMPT: &str = r#"You are a dungeon master for a text-based adventure game. Generate an engaging fantasy story with choices that affect the player's stats (health, gold) and inventory. The adventure lasts exactly 10 steps. Each choice should be meaningful and interesting. Return your response strictly as a single JSON object with this structure:
{
    "story": "current situation description",
    "choices": ["choice 1", "choice 2", "choice 3"],
    "effects": {
        "1": {"health": 0, "gold": 0, "items": []},
        "2": {"health": 0, "gold": 0, "items": []},
        "3": {"health": 0, "gold": 0, "items": []}
    }
}
Offer between one and three choices, and include an effects entry for every choice you offer. "health" and "gold" are signed integers added to the player's stats; "items" lists item names granted by that choice. Do not include any text outside the JSON object."#;

/// Builds the messages sent to the model. Intentionally dumb: it only
/// formats text. No parsing, no networking, no engine logic.
pub struct PromptBuilder;

impl PromptBuilder {
    /// System instruction plus the kick-off message for a fresh game.
    pub fn opening_messages(state: &PlayerState) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(format!(
                "{SYSTEM_PROMPT}\n\nCurrent player state: {}",
                state_json(state)
            )),
            ChatMessage::user("Start the adventure!"),
        ]
    }

    /// History entries recording an accepted choice: the scene the model
    /// produced, then the player's pick and the state after its effects.
    pub fn choice_messages(
        scene: &Scene,
        choice_index: usize,
        state_after: &PlayerState,
    ) -> Vec<ChatMessage> {
        let label = scene
            .choices
            .get(choice_index)
            .map(|choice| choice.label.as_str())
            .unwrap_or_default();

        vec![
            ChatMessage::assistant(scene_json(scene)),
            ChatMessage::user(format!(
                "Choice made: {label}\nNew player state: {}",
                state_json(state_after)
            )),
        ]
    }

    /// Request for the closing scene once all steps are done.
    pub fn epilogue_message(state: &PlayerState) -> ChatMessage {
        ChatMessage::user(format!(
            "The player has completed all {MAX_STEPS} steps of the adventure. \
             Write a satisfying epilogue that references the journey and gives the \
             character's arc a sense of closure. Final player state: {}. \
             Respond with the same JSON object, with an empty \"choices\" array \
             and empty \"effects\".",
            state_json(state)
        ))
    }
}

fn state_json(state: &PlayerState) -> String {
    serde_json::json!({
        "health": state.health,
        "gold": state.gold,
        "inventory": state.inventory,
        "step": state.step,
    })
    .to_string()
}

/// Re-serialize a scene into the wire envelope for the assistant echo.
fn scene_json(scene: &Scene) -> String {
    let labels: Vec<&str> = scene.choices.iter().map(|c| c.label.as_str()).collect();
    let mut effects = serde_json::Map::new();
    for (index, choice) in scene.choices.iter().enumerate() {
        let items: Vec<&str> = choice.effects.item.as_deref().into_iter().collect();
        effects.insert(
            (index + 1).to_string(),
            serde_json::json!({
                "health": choice.effects.health,
                "gold": choice.effects.gold,
                "items": items,
            }),
        );
    }
    serde_json::json!({
        "story": scene.story,
        "choices": labels,
        "effects": effects,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::message::Role;
    use crate::model::scene::{Choice, ChoiceEffects};

    fn sample_scene() -> Scene {
        Scene {
            story: "A troll blocks the bridge.".into(),
            choices: vec![
                Choice {
                    label: "Fight the troll".into(),
                    effects: ChoiceEffects {
                        health: -20,
                        gold: 0,
                        item: None,
                    },
                },
                Choice {
                    label: "Pay the toll".into(),
                    effects: ChoiceEffects {
                        health: 0,
                        gold: -10,
                        item: Some("bridge pass".into()),
                    },
                },
            ],
        }
    }

    #[test]
    fn opening_messages_embed_state_and_kickoff() {
        let messages = PromptBuilder::opening_messages(&PlayerState::default());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("\"health\":100"));
        assert!(messages[0].content.contains("\"step\":0"));
        assert_eq!(messages[1], ChatMessage::user("Start the adventure!"));
    }

    #[test]
    fn choice_messages_echo_scene_and_record_the_pick() {
        let mut state = PlayerState::default();
        let scene = sample_scene();
        state.apply(&scene.choices[1].effects);

        let messages = PromptBuilder::choice_messages(&scene, 1, &state);

        assert_eq!(messages[0].role, Role::Assistant);
        assert!(messages[0].content.contains("A troll blocks the bridge."));
        assert!(messages[0].content.contains("bridge pass"));
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("Choice made: Pay the toll"));
        assert!(messages[1].content.contains("\"step\":1"));
    }

    #[test]
    fn assistant_echo_is_valid_scene_json() {
        let scene = sample_scene();
        let echoed = crate::engine::scene_parser::parse_scene(&scene_json(&scene)).unwrap();
        assert_eq!(echoed, scene);
    }

    #[test]
    fn prompts_are_deterministic() {
        let state = PlayerState::default();
        assert_eq!(
            PromptBuilder::opening_messages(&state),
            PromptBuilder::opening_messages(&state)
        );
    }

    #[test]
    fn epilogue_message_mentions_the_final_state() {
        let mut state = PlayerState::default();
        state.gold = 42;
        let message = PromptBuilder::epilogue_message(&state);
        assert_eq!(message.role, Role::User);
        assert!(message.content.contains("\"gold\":42"));
    }
}
