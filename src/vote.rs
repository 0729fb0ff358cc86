// Per-player vote records for a match day, and the fanta-vote derivation.
// Votes are deposited by an external ingestion pipeline; the engine never
// writes into an existing record.

use serde::{Deserialize, Serialize};

use crate::{database::VOTES, types::{MatchDay, PlayerId}};

// Bonus weights per event.
const GOAL_BONUS: f64 = 3.0;
const ASSIST_BONUS: f64 = 1.0;
const PENALTY_SAVED_BONUS: f64 = 3.0;

// Malus weights per event.
const GOAL_CONCEDED_MALUS: f64 = 1.0;
const YELLOW_CARD_MALUS: f64 = 0.5;
const RED_CARD_MALUS: f64 = 1.0;
const PENALTY_MISSED_MALUS: f64 = 3.0;
const OWN_GOAL_MALUS: f64 = 2.0;

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone)]
pub struct Vote {
    pub player_id: PlayerId,
    pub match_day: MatchDay,

    // Newspaper vote, before bonuses and maluses.
    pub base_vote: Option<f64>,

    // Stored fanta vote. When present it is authoritative; otherwise the
    // value is derived from the base vote and the event counts.
    pub fanta_vote: Option<f64>,

    pub goals_scored: Option<u32>,
    pub assists: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
    pub penalties_saved: Option<u32>,
    pub penalties_missed: Option<u32>,
    pub own_goals: Option<u32>,
    pub goals_conceded: Option<u32>,
}

// Basics.
impl Vote {
    pub fn build(player_id: PlayerId, match_day: MatchDay) -> Self {
        Self {
            player_id: player_id,
            match_day: match_day,
            ..Default::default()
        }
    }

    // Save the vote to the database. One record per (player, match day).
    pub fn save(&self) {
        VOTES.lock().unwrap().insert((self.player_id, self.match_day), self.clone());
    }

    // A missing vote is a normal condition, not an error.
    pub fn fetch_from_db(player_id: &PlayerId, match_day: MatchDay) -> Option<Self> {
        VOTES.lock().unwrap().get(&(*player_id, match_day)).cloned()
    }

    // Get the highest match day any vote has been recorded for.
    pub fn max_match_day() -> Option<MatchDay> {
        VOTES.lock().unwrap().keys().map(|key| key.1).max()
    }
}

// Functional.
impl Vote {
    // Weighted sum of the positive events.
    fn bonus(&self) -> f64 {
        count(self.goals_scored) * GOAL_BONUS
            + count(self.assists) * ASSIST_BONUS
            + count(self.penalties_saved) * PENALTY_SAVED_BONUS
    }

    // Weighted sum of the negative events.
    fn malus(&self) -> f64 {
        count(self.goals_conceded) * GOAL_CONCEDED_MALUS
            + count(self.yellow_cards) * YELLOW_CARD_MALUS
            + count(self.red_cards) * RED_CARD_MALUS
            + count(self.penalties_missed) * PENALTY_MISSED_MALUS
            + count(self.own_goals) * OWN_GOAL_MALUS
    }

    // Resolve the fanta vote for this record, if one can be resolved at all.
    pub fn resolve_fanta_vote(&self) -> Option<f64> {
        if self.fanta_vote.is_some() {
            return self.fanta_vote;
        }

        match self.base_vote {
            Some(base) => Some(base + self.bonus() - self.malus()),
            _ => None,
        }
    }
}

// Treat an absent event count as zero occurrences.
fn count(events: Option<u32>) -> f64 {
    events.unwrap_or(0) as f64
}
