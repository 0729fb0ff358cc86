// Matches of a competition's calendar.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    competition::{standings::Standings, Competition, Format},
    database::MATCHES,
    error::{Error, Result},
    types::{CompetitionId, MatchDay, MatchId, TeamId},
};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone)]
pub struct Match {
    pub id: MatchId,
    pub competition_id: CompetitionId,
    pub match_day: MatchDay,

    // Unresolved knockout slots hold no team until a prior round completes.
    pub home_team: Option<TeamId>,
    pub away_team: Option<TeamId>,

    pub round_number: Option<u32>,
    pub round_label: Option<String>,

    // Position of the match within its round.
    pub match_number: Option<u32>,
    pub group_name: Option<String>,

    pub home_goals: u32,
    pub away_goals: u32,
    pub played: bool,
}

// Basics.
impl Match {
    pub fn build(competition_id: CompetitionId, match_day: MatchDay) -> Self {
        Self {
            competition_id: competition_id,
            match_day: match_day,
            ..Default::default()
        }
    }

    // Save a match to the database for the first time.
    pub fn save_new(&mut self) {
        let mut matches = MATCHES.lock().unwrap();
        self.id = match matches.keys().max() {
            Some(n) => n + 1,
            _ => 1,
        };
        matches.insert(self.id, self.clone());
    }

    pub fn fetch_from_db(id: &MatchId) -> Result<Self> {
        match MATCHES.lock().unwrap().get(id) {
            Some(game) => Ok(game.clone()),
            _ => Err(Error::not_found("match", id)),
        }
    }

    // Update the match to the database.
    pub fn save(&self) {
        MATCHES.lock().unwrap().insert(self.id, self.clone());
    }

    // Get all matches of a competition, ordered by match day.
    pub fn fetch_competition_matches(competition_id: &CompetitionId) -> Vec<Self> {
        let mut matches: Vec<Self> = MATCHES.lock().unwrap()
            .values()
            .filter(|game| game.competition_id == *competition_id)
            .cloned()
            .collect();

        matches.sort_by(|a, b| (a.match_day, a.id).cmp(&(b.match_day, b.id)));
        return matches;
    }

    // Delete every match of a competition. Calendar generation replaces the
    // previous match set as one unit.
    pub fn delete_competition_matches(competition_id: &CompetitionId) {
        MATCHES.lock().unwrap().retain(|_, game| game.competition_id != *competition_id);
    }
}

// Functional.
impl Match {
    // Record a final score. Formats with a literal score feed the goal-based
    // standings counters; Race standings only ever move through scoring.
    pub fn record_result(id: &MatchId, home_goals: u32, away_goals: u32) -> Result<()> {
        let mut game = Self::fetch_from_db(id)?;
        let comp = Competition::fetch_from_db(&game.competition_id)?;

        let (home_id, away_id) = match (game.home_team, game.away_team) {
            (Some(home), Some(away)) => (home, away),
            _ => return Err(Error::InvalidState(format!("match {id} still has unresolved teams"))),
        };

        game.home_goals = home_goals;
        game.away_goals = away_goals;
        game.played = true;
        game.save();

        if comp.format == Format::League || comp.format == Format::Cup {
            Standings::record_score(&comp, &home_id, home_goals, away_goals)?;
            Standings::record_score(&comp, &away_id, away_goals, home_goals)?;
        }

        log::info!("recorded {home_goals}-{away_goals} for match {id}");
        Ok(())
    }

    // Get JSON for a competition screen.
    pub fn comp_screen_package(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "match_day": self.match_day,
            "home_team": self.home_team,
            "away_team": self.away_team,
            "round_label": self.round_label,
            "match_number": self.match_number,
            "group_name": self.group_name,
            "home_goals": self.home_goals,
            "away_goals": self.away_goals,
            "played": self.played,
        })
    }
}
