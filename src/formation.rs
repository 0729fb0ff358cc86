// Match-day lineups: the starting eleven grouped by role, plus a bench in
// substitution priority order.

use serde::{Deserialize, Serialize};

use crate::{database::FORMATIONS, player::Role, types::{MatchDay, PlayerId, TeamId}};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone)]
pub struct Formation {
    pub team_id: TeamId,
    pub match_day: MatchDay,

    // Display label for the shape, e.g. "4-3-3".
    pub module: Option<String>,

    pub goalkeeper: Option<PlayerId>,
    pub defenders: Vec<PlayerId>,
    pub midfielders: Vec<PlayerId>,
    pub forwards: Vec<PlayerId>,

    // Substitution priority order.
    pub bench: Vec<PlayerId>,
}

// Basics.
impl Formation {
    pub fn build(team_id: TeamId, match_day: MatchDay) -> Self {
        Self {
            team_id: team_id,
            match_day: match_day,
            ..Default::default()
        }
    }

    // Save the formation to the database. One lineup per (team, match day).
    pub fn save(&self) {
        FORMATIONS.lock().unwrap().insert((self.team_id, self.match_day), self.clone());
    }

    // A team that fielded no lineup is a normal condition, not an error.
    pub fn fetch_from_db(team_id: &TeamId, match_day: MatchDay) -> Option<Self> {
        FORMATIONS.lock().unwrap().get(&(*team_id, match_day)).cloned()
    }
}

// Functional.
impl Formation {
    // Get the starting slots in lineup order, with the role each slot fills.
    pub fn starters(&self) -> Vec<(PlayerId, Role)> {
        let mut starters = Vec::new();

        if let Some(goalkeeper) = self.goalkeeper {
            starters.push((goalkeeper, Role::Goalkeeper));
        }
        for id in self.defenders.iter() {
            starters.push((*id, Role::Defender));
        }
        for id in self.midfielders.iter() {
            starters.push((*id, Role::Midfielder));
        }
        for id in self.forwards.iter() {
            starters.push((*id, Role::Forward));
        }

        return starters;
    }
}
