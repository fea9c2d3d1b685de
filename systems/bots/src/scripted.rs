use bomber_arena_core::{Action, AgentSnapshot, AgentView, BotStrategy, Grid};

/// Replays a fixed list of actions, indexed by tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedBot {
    name: String,
    script: Vec<Action>,
}

impl ScriptedBot {
    /// Creates a bot that cycles through `script`; an empty script always idles.
    #[must_use]
    pub fn new(name: impl Into<String>, script: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            script,
        }
    }
}

impl Default for ScriptedBot {
    fn default() -> Self {
        Self::new(
            "scripted",
            vec![Action::PlaceBomb, Action::MoveDown, Action::MoveRight],
        )
    }
}

impl BotStrategy for ScriptedBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(
        &mut self,
        _grid: &Grid,
        _agents: &AgentView,
        tick: u64,
        _me: &AgentSnapshot,
    ) -> Action {
        if self.script.is_empty() {
            return Action::Idle;
        }
        let len = self.script.len() as u64;
        usize::try_from(tick % len)
            .ok()
            .and_then(|index| self.script.get(index).copied())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomber_arena_core::{AgentId, CellPos};

    #[test]
    fn cycles_through_the_script() {
        let grid = Grid::bordered(5, 5);
        let me = AgentSnapshot {
            id: AgentId::new(1),
            name: "scripted".to_owned(),
            position: CellPos::new(1, 1),
            lives: 1,
        };
        let view = AgentView::from_snapshots(vec![me.clone()]);
        let mut bot = ScriptedBot::default();

        let actions: Vec<Action> = (0..5).map(|tick| bot.decide(&grid, &view, tick, &me)).collect();
        assert_eq!(
            actions,
            vec![
                Action::PlaceBomb,
                Action::MoveDown,
                Action::MoveRight,
                Action::PlaceBomb,
                Action::MoveDown,
            ]
        );
    }

    #[test]
    fn empty_script_idles() {
        let grid = Grid::bordered(5, 5);
        let me = AgentSnapshot {
            id: AgentId::new(2),
            name: "idle".to_owned(),
            position: CellPos::new(3, 1),
            lives: 1,
        };
        let view = AgentView::from_snapshots(vec![me.clone()]);
        let mut bot = ScriptedBot::new("idle", Vec::new());

        assert_eq!(bot.name(), "idle");
        assert_eq!(bot.decide(&grid, &view, 9, &me), Action::Idle);
    }
}
