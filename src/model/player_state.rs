use crate::model::scene::ChoiceEffects;

/// The adventure runs for exactly this many accepted turns.
pub const MAX_STEPS: u32 = 10;

/// The single live record of the player's stats. Owned by the turn
/// controller and mutated exactly once per accepted choice; the UI only
/// ever sees clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub step: u32,
    pub health: u32,
    pub gold: u32,
    pub inventory: Vec<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            step: 0,
            health: 100,
            gold: 0,
            inventory: Vec::new(),
        }
    }
}

impl PlayerState {
    /// Apply one accepted choice. Health and gold saturate at zero, the
    /// granted item (if any) is appended in order, and the step counter
    /// advances by exactly one.
    pub fn apply(&mut self, effects: &ChoiceEffects) {
        self.health = add_clamped(self.health, effects.health);
        self.gold = add_clamped(self.gold, effects.gold);
        if let Some(item) = &effects.item {
            self.inventory.push(item.clone());
        }
        self.step += 1;
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn is_complete(&self) -> bool {
        self.step >= MAX_STEPS
    }

    pub fn inventory_summary(&self) -> String {
        if self.inventory.is_empty() {
            "None".to_string()
        } else {
            self.inventory.join(", ")
        }
    }
}

fn add_clamped(current: u32, delta: i32) -> u32 {
    if delta >= 0 {
        current.saturating_add(delta as u32)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects(health: i32, gold: i32, item: Option<&str>) -> ChoiceEffects {
        ChoiceEffects {
            health,
            gold,
            item: item.map(str::to_string),
        }
    }

    #[test]
    fn applying_a_choice_updates_every_field() {
        let mut state = PlayerState::default();
        state.apply(&effects(-20, 10, Some("rusty key")));

        assert_eq!(state.step, 1);
        assert_eq!(state.health, 80);
        assert_eq!(state.gold, 10);
        assert_eq!(state.inventory, vec!["rusty key".to_string()]);
    }

    #[test]
    fn health_clamps_at_zero() {
        let mut state = PlayerState {
            health: 50,
            ..PlayerState::default()
        };
        state.apply(&effects(-150, 0, None));

        assert_eq!(state.health, 0);
        assert!(state.is_dead());
    }

    #[test]
    fn gold_clamps_at_zero() {
        let mut state = PlayerState {
            gold: 5,
            ..PlayerState::default()
        };
        state.apply(&effects(0, -30, None));

        assert_eq!(state.gold, 0);
    }

    #[test]
    fn inventory_keeps_order_and_duplicates() {
        let mut state = PlayerState::default();
        state.apply(&effects(0, 0, Some("torch")));
        state.apply(&effects(0, 0, Some("rope")));
        state.apply(&effects(0, 0, Some("torch")));

        assert_eq!(state.inventory, vec!["torch", "rope", "torch"]);
        assert_eq!(state.step, 3);
    }

    #[test]
    fn completion_requires_max_steps() {
        let mut state = PlayerState::default();
        for _ in 0..MAX_STEPS {
            assert!(!state.is_complete());
            state.apply(&effects(0, 0, None));
        }
        assert!(state.is_complete());
    }

    #[test]
    fn inventory_summary_reads_none_when_empty() {
        let state = PlayerState::default();
        assert_eq!(state.inventory_summary(), "None");
    }
}
