//! Per-agent state tracked by the world.

use bomber_arena_core::{AgentId, AgentSnapshot, CellPos, AGENT_COUNT};

#[derive(Clone, Debug)]
pub(crate) struct Agent {
    pub(crate) id: AgentId,
    pub(crate) name: String,
    pub(crate) position: CellPos,
    pub(crate) lives: u32,
}

impl Agent {
    pub(crate) const fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Removes one life, returning the remaining count.
    pub(crate) fn wound(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub(crate) fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            name: self.name.clone(),
            position: self.position,
            lives: self.lives,
        }
    }
}

/// Fixed roster of the four agents, stored in identifier order.
#[derive(Clone, Debug)]
pub(crate) struct AgentRoster {
    agents: Vec<Agent>,
}

impl AgentRoster {
    pub(crate) fn spawn(
        spawns: [CellPos; AGENT_COUNT],
        names: [String; AGENT_COUNT],
        lives: u32,
    ) -> Self {
        let agents = AgentId::roster()
            .into_iter()
            .zip(spawns)
            .zip(names)
            .map(|((id, position), name)| Agent {
                id,
                name,
                position,
                lives,
            })
            .collect();
        Self { agents }
    }

    pub(crate) fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub(crate) fn living_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents
            .iter_mut()
            .find(|agent| agent.id == id && agent.is_alive())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    pub(crate) fn alive_count(&self) -> usize {
        self.agents.iter().filter(|agent| agent.is_alive()).count()
    }

    pub(crate) fn survivors(&self) -> Vec<AgentId> {
        self.agents
            .iter()
            .filter(|agent| agent.is_alive())
            .map(|agent| agent.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> AgentRoster {
        let spawns = [
            CellPos::new(1, 1),
            CellPos::new(5, 1),
            CellPos::new(1, 5),
            CellPos::new(5, 5),
        ];
        let names = ["a", "b", "c", "d"].map(String::from);
        AgentRoster::spawn(spawns, names, 2)
    }

    #[test]
    fn spawn_assigns_ids_in_order() {
        let roster = roster();
        let ids: Vec<u8> = roster.iter().map(|agent| agent.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        let second = roster.get(AgentId::new(2)).expect("agent two");
        assert_eq!(second.position, CellPos::new(5, 1));
        assert_eq!(second.name, "b");
    }

    #[test]
    fn wounding_never_goes_below_zero() {
        let mut roster = roster();
        let agent = roster.living_mut(AgentId::new(1)).expect("alive");
        assert_eq!(agent.wound(), 1);
        assert_eq!(agent.wound(), 0);
        assert_eq!(agent.wound(), 0);

        assert!(roster.living_mut(AgentId::new(1)).is_none());
        assert_eq!(roster.alive_count(), 3);
        assert_eq!(
            roster.survivors(),
            vec![AgentId::new(2), AgentId::new(3), AgentId::new(4)]
        );
    }

    #[test]
    fn snapshot_is_detached_from_live_agent() {
        let mut roster = roster();
        let before = roster.get(AgentId::new(3)).expect("agent").snapshot();
        if let Some(agent) = roster.living_mut(AgentId::new(3)) {
            agent.position = CellPos::new(2, 5);
        }
        assert_eq!(before.position, CellPos::new(1, 5));
    }
}
