use std::io::{self, BufReader};

use bomber_arena_system_bots::{FleeBot, GreedyBot, ScriptedBot};
use bomber_arena_system_game_loop::Strategy;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::human::HumanInput;

/// Strategy that can occupy an agent slot from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BotKind {
    /// Chases the nearest opponent and bombs it when it is safe to do so.
    Greedy,
    /// Prioritises escaping danger, then hunts with a deeper search.
    Flee,
    /// Repeats a fixed bomb-and-step routine.
    Scripted,
    /// Reads moves from standard input.
    Human,
}

impl BotKind {
    /// Builds a fresh strategy for one agent slot.
    pub(crate) fn build(self) -> Strategy {
        match self {
            Self::Greedy => Box::new(GreedyBot::new()),
            Self::Flee => Box::new(FleeBot::new()),
            Self::Scripted => Box::new(ScriptedBot::default()),
            Self::Human => Box::new(HumanInput::new(BufReader::new(io::stdin()), "human")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialise_in_lowercase() {
        let json = serde_json::to_string(&[BotKind::Greedy, BotKind::Human]).expect("serialises");
        assert_eq!(json, r#"["greedy","human"]"#);
    }

    #[test]
    fn built_strategies_carry_their_names() {
        assert_eq!(BotKind::Greedy.build().name(), "greedy");
        assert_eq!(BotKind::Flee.build().name(), "flee");
        assert_eq!(BotKind::Scripted.build().name(), "scripted");
    }
}
