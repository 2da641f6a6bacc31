use gabi_engine::models::PlayerId;
use gabi_engine::{GameEvent, OutputPort, PhaseSignal};
use log::warn;
use std::io::Write;

/// Writes events as plain text lines.
pub struct ConsoleOutput<W: Write> {
    out: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleOutput<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> OutputPort for ConsoleOutput<W> {
    fn emit(&mut self, event: GameEvent) {
        if let Err(e) = writeln!(self.out, "{}", render(&event)) {
            warn!("failed to write event: {}", e);
        }
    }
}

fn ids(players: &[PlayerId]) -> String {
    if players.is_empty() {
        return "none".to_string();
    }
    players
        .iter()
        .map(|id| format!("Player {}", id))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render(event: &GameEvent) -> String {
    match event {
        GameEvent::Distribution {
            summary,
            assignments,
        } => {
            let mut lines = vec![summary.clone()];
            lines.extend(
                assignments
                    .iter()
                    .map(|a| format!("  Player {}: {}", a.player_id, a.role)),
            );
            lines.join("\n")
        }
        GameEvent::Transition { signal } => match signal {
            PhaseSignal::GoToNight => "== Night falls ==".to_string(),
            PhaseSignal::GoToDay => "== Day breaks ==".to_string(),
            PhaseSignal::GoToVote => "== The village votes ==".to_string(),
            PhaseSignal::GoToLobby => "== Back to the lobby ==".to_string(),
        },
        GameEvent::Prompt(prompt) => {
            let options = prompt
                .options
                .iter()
                .map(|option| {
                    let targets: Vec<String> = option
                        .targets
                        .iter()
                        .filter(|t| t.enabled)
                        .map(|t| t.player_id.to_string())
                        .collect();
                    if targets.is_empty() {
                        option.kind.to_string()
                    } else {
                        format!("{} [{}]", option.kind, targets.join(" "))
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Night {}: Player {} ({}) may {}",
                prompt.day, prompt.actor_id, prompt.role, options
            )
        }
        GameEvent::NightResolved {
            day,
            notes,
            deaths,
            revelations,
            ..
        } => {
            let mut lines = vec![format!("Night {} is over.", day)];
            lines.extend(notes.iter().map(|note| format!("  {}", note)));
            lines.extend(revelations.iter().map(|r| {
                format!(
                    "  (to Player {}) Player {} {}",
                    r.actor_id,
                    r.target_id,
                    r.insight.describe()
                )
            }));
            lines.push(format!("  Died: {}", ids(deaths)));
            lines.join("\n")
        }
        GameEvent::VoteOptions { day, targets } => {
            format!("Day {} vote, choose one of: {}", day, ids(targets))
        }
        GameEvent::VoteResolved {
            target_id,
            deaths,
            cured,
        } => {
            let mut line = format!("Player {} was voted out. Died: {}", target_id, ids(deaths));
            if !cured.is_empty() {
                line.push_str(&format!(". Curse lifted from: {}", ids(cured)));
            }
            line
        }
        GameEvent::Victory { announcement, .. } => announcement.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_block_per_event() {
        let mut console = ConsoleOutput::new(Vec::new());
        console.emit(GameEvent::Transition {
            signal: PhaseSignal::GoToDay,
        });
        console.emit(GameEvent::VoteResolved {
            target_id: 4,
            deaths: vec![4, 2],
            cured: vec![],
        });

        let text = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            text,
            "== Day breaks ==\nPlayer 4 was voted out. Died: Player 4, Player 2\n"
        );
    }

    #[test]
    fn empty_death_list_reads_none() {
        let line = render(&GameEvent::NightResolved {
            day: 2,
            notes: vec![],
            deaths: vec![],
            revelations: vec![],
            alive: vec![1, 2],
            dead: vec![],
        });
        assert_eq!(line, "Night 2 is over.\n  Died: none");
    }
}
