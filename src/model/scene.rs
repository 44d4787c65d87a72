/// Most choices the model may offer in a single scene.
pub const MAX_CHOICES: usize = 3;

/// One parsed turn of the story: narrative text plus the options offered
/// to the player. Produced by the scene parser, consumed by the UI and
/// the turn controller, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub story: String,
    pub choices: Vec<Choice>,
}

impl Scene {
    /// A closing scene with no choices. Only the controller builds these;
    /// the parser rejects choice-less scenes.
    pub fn terminal(story: impl Into<String>) -> Self {
        Self {
            story: story.into(),
            choices: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub effects: ChoiceEffects,
}

/// Stat deltas attached to a choice. Signed values are applied to the
/// player's stats; `item` is appended to the inventory when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceEffects {
    pub health: i32,
    pub gold: i32,
    pub item: Option<String>,
}
