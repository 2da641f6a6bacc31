use crate::models::{GameResult, Player, WinReason, WinRules, SURVIVAL_DAY_LIMIT};

pub fn evaluate(roster: &[Player], current_day: u32, rules: &WinRules) -> GameResult {
    let (creatures, villagers) = roster
        .iter()
        .filter(|p| p.alive)
        .fold((0usize, 0usize), |(c, v), p| {
            if p.role.is_creature() {
                (c + 1, v)
            } else {
                (c, v + 1)
            }
        });

    if creatures == 0 {
        return GameResult::VillagerWin(WinReason::CreaturesEliminated);
    }
    if current_day > SURVIVAL_DAY_LIMIT {
        return GameResult::VillagerWin(WinReason::SurvivedDayLimit);
    }
    if rules.creature_parity && creatures >= villagers {
        return GameResult::CreatureWin(WinReason::CreatureParity);
    }
    GameResult::InProgress
}
