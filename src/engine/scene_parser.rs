use std::collections::HashMap;

use serde::Deserialize;

use crate::engine::error::StoryError;
use crate::model::scene::{Choice, ChoiceEffects, Scene, MAX_CHOICES};

/// Wire shape the model is instructed to return. Effects are keyed by the
/// 1-based choice number, matching the prompt's example envelope.
#[derive(Deserialize)]
struct SceneWire {
    story: String,
    #[serde(default)]
    choices: Vec<String>,
    #[serde(default)]
    effects: HashMap<String, EffectsWire>,
}

#[derive(Deserialize, Default)]
struct EffectsWire {
    #[serde(default)]
    health: i32,
    #[serde(default)]
    gold: i32,
    #[serde(default)]
    items: Vec<String>,
}

/// Slice out the first JSON object in the completion. Models routinely
/// wrap the envelope in markdown fences or prose; everything outside the
/// outermost braces is dropped.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parse a completion into a playable scene with 1..=3 choices.
pub fn parse_scene(raw: &str) -> Result<Scene, StoryError> {
    let wire: SceneWire = serde_json::from_str(extract_json(raw))
        .map_err(|e| StoryError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let story = wire.story.trim();
    if story.is_empty() {
        return Err(StoryError::MalformedResponse(
            "scene has no narrative text".into(),
        ));
    }
    if wire.choices.is_empty() {
        return Err(StoryError::MalformedResponse(
            "scene offers no choices".into(),
        ));
    }
    if wire.choices.len() > MAX_CHOICES {
        return Err(StoryError::MalformedResponse(format!(
            "scene offers {} choices, at most {MAX_CHOICES} are allowed",
            wire.choices.len()
        )));
    }

    let mut choices = Vec::with_capacity(wire.choices.len());
    for (index, label) in wire.choices.iter().enumerate() {
        let number = index + 1;
        let effects = wire.effects.get(&number.to_string()).ok_or_else(|| {
            StoryError::MalformedResponse(format!("missing effects for choice {number}"))
        })?;
        choices.push(Choice {
            label: label.trim().to_string(),
            effects: ChoiceEffects {
                health: effects.health,
                gold: effects.gold,
                item: effects.items.first().cloned(),
            },
        });
    }

    Ok(Scene {
        story: story.to_string(),
        choices,
    })
}

/// Parse a closing scene, keeping only the narrative. Any choices the
/// model tacks onto an epilogue are ignored.
pub fn parse_epilogue(raw: &str) -> Result<String, StoryError> {
    let wire: SceneWire = serde_json::from_str(extract_json(raw))
        .map_err(|e| StoryError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let story = wire.story.trim();
    if story.is_empty() {
        return Err(StoryError::MalformedResponse(
            "epilogue has no narrative text".into(),
        ));
    }
    Ok(story.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "story": "A fork in the forest path.",
        "choices": ["Take the left path", "Take the right path", "Climb a tree"],
        "effects": {
            "1": {"health": -10, "gold": 0, "items": []},
            "2": {"health": 0, "gold": 15, "items": ["silver coin"]},
            "3": {"health": -5, "gold": 0, "items": ["pine cone", "sap"]}
        }
    }"#;

    #[test]
    fn well_formed_scene_parses_three_choices_in_order() {
        let scene = parse_scene(WELL_FORMED).unwrap();

        assert_eq!(scene.story, "A fork in the forest path.");
        assert_eq!(scene.choices.len(), 3);
        assert_eq!(scene.choices[0].label, "Take the left path");
        assert_eq!(scene.choices[0].effects.health, -10);
        assert_eq!(scene.choices[1].effects.gold, 15);
        assert_eq!(scene.choices[1].effects.item.as_deref(), Some("silver coin"));
    }

    #[test]
    fn only_the_first_listed_item_is_kept() {
        let scene = parse_scene(WELL_FORMED).unwrap();
        assert_eq!(scene.choices[2].effects.item.as_deref(), Some("pine cone"));
    }

    #[test]
    fn fenced_json_is_recovered() {
        let raw = format!("```json\n{WELL_FORMED}\n```\nHave fun!");
        let scene = parse_scene(&raw).unwrap();
        assert_eq!(scene.choices.len(), 3);
    }

    #[test]
    fn extract_json_without_braces_returns_the_input() {
        assert_eq!(extract_json("  not json  "), "not json");
    }

    #[test]
    fn zero_choices_is_malformed() {
        let raw = r#"{"story": "The end?", "choices": [], "effects": {}}"#;
        let err = parse_scene(raw).unwrap_err();
        assert!(matches!(err, StoryError::MalformedResponse(_)), "{err}");
    }

    #[test]
    fn four_choices_is_malformed() {
        let raw = r#"{
            "story": "Too many doors.",
            "choices": ["a", "b", "c", "d"],
            "effects": {
                "1": {}, "2": {}, "3": {}, "4": {}
            }
        }"#;
        let err = parse_scene(raw).unwrap_err();
        assert!(matches!(err, StoryError::MalformedResponse(_)), "{err}");
    }

    #[test]
    fn missing_effects_entry_is_malformed() {
        let raw = r#"{
            "story": "A quiet glade.",
            "choices": ["Rest", "Move on"],
            "effects": {"1": {"health": 10}}
        }"#;
        let err = parse_scene(raw).unwrap_err();
        assert!(err.to_string().contains("choice 2"), "{err}");
    }

    #[test]
    fn omitted_effect_fields_default_to_nothing() {
        let raw = r#"{
            "story": "A quiet glade.",
            "choices": ["Rest"],
            "effects": {"1": {}}
        }"#;
        let scene = parse_scene(raw).unwrap();
        assert_eq!(scene.choices[0].effects, ChoiceEffects::default());
    }

    #[test]
    fn blank_story_is_malformed() {
        let raw = r#"{"story": "  ", "choices": ["Go"], "effects": {"1": {}}}"#;
        assert!(parse_scene(raw).is_err());
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_scene("the dragon ate the scroll").unwrap_err();
        assert!(matches!(err, StoryError::MalformedResponse(_)), "{err}");
    }

    #[test]
    fn epilogue_ignores_choices() {
        let raw = r#"{"story": "And so it ends.", "choices": ["impossible"], "effects": {}}"#;
        assert_eq!(parse_epilogue(raw).unwrap(), "And so it ends.");
    }
}
