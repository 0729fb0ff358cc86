// Round-robin scheduling under the circle method.

use crate::types::TeamId;

// One scheduled pairing, home team first.
pub type Pairing = (TeamId, TeamId);

// Generate the base rounds of a single round robin: every team plays every
// other team exactly once. Produces N-1 rounds for an even team count and N
// rounds for an odd one, with one team idle per round. Fewer than two teams
// yield no rounds; the caller decides whether that is an error.
pub fn generate_rounds(teams: &[TeamId]) -> Vec<Vec<Pairing>> {
    if teams.len() < 2 {
        return Vec::new();
    }

    // The bye slot absorbs the idle team when the count is odd.
    let mut slots: Vec<Option<TeamId>> = teams.iter().map(|id| Some(*id)).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let n = slots.len();
    let mut rounds = Vec::new();

    for _ in 0..n - 1 {
        let mut round = Vec::new();
        for i in 0..n / 2 {
            // Pairings involving the bye slot are dropped.
            if let (Some(home), Some(away)) = (slots[i], slots[n - 1 - i]) {
                round.push((home, away));
            }
        }
        rounds.push(round);

        // Rotate by one step, keeping the first slot fixed.
        let moved = slots.remove(1);
        slots.push(moved);
    }

    return rounds;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::generate_rounds;
    use crate::types::TeamId;

    fn team_ids(count: u8) -> Vec<TeamId> {
        (1..=count).collect()
    }

    #[test]
    fn even_field_has_full_rounds() {
        for count in [2, 4, 6, 8, 12] {
            let teams = team_ids(count);
            let rounds = generate_rounds(&teams);

            assert_eq!(rounds.len(), (count - 1) as usize);
            for round in rounds.iter() {
                assert_eq!(round.len(), (count / 2) as usize);

                // Every team appears exactly once per round.
                let mut seen = HashSet::new();
                for (home, away) in round.iter() {
                    assert!(seen.insert(*home));
                    assert!(seen.insert(*away));
                }
                assert_eq!(seen.len(), count as usize);
            }
        }
    }

    #[test]
    fn odd_field_sits_every_team_out_once() {
        for count in [3, 5, 7, 9] {
            let teams = team_ids(count);
            let rounds = generate_rounds(&teams);

            assert_eq!(rounds.len(), count as usize);

            let mut idle_counts = vec![0; count as usize + 1];
            for round in rounds.iter() {
                assert_eq!(round.len(), ((count - 1) / 2) as usize);

                let playing: HashSet<TeamId> = round.iter()
                    .flat_map(|(home, away)| [*home, *away])
                    .collect();
                for team in teams.iter() {
                    if !playing.contains(team) {
                        idle_counts[*team as usize] += 1;
                    }
                }
            }

            // Across the whole table, each team is idle exactly once.
            for team in teams.iter() {
                assert_eq!(idle_counts[*team as usize], 1);
            }
        }
    }

    #[test]
    fn every_pair_meets_exactly_once() {
        let teams = team_ids(7);
        let rounds = generate_rounds(&teams);

        let mut met = HashSet::new();
        for round in rounds.iter() {
            for (home, away) in round.iter() {
                let pair = (*home.min(away), *home.max(away));
                assert!(met.insert(pair), "{home} and {away} met twice");
            }
        }

        assert_eq!(met.len(), 7 * 6 / 2);
    }

    #[test]
    fn too_few_teams_yield_no_rounds() {
        assert!(generate_rounds(&[]).is_empty());
        assert!(generate_rounds(&[1]).is_empty());
    }
}
