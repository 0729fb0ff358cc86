// Standings rows and the incremental updates applied to them. Rows are
// created when the competition is and live until it is deleted.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    database::STANDINGS,
    error::{Error, Result},
    team::Team,
    types::{CompetitionId, TeamId},
};

use super::{Competition, Format};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone)]
pub struct Standings {
    pub competition_id: CompetitionId,
    pub team_id: TeamId,

    // Populated once group assignment is known.
    pub group_name: Option<String>,

    pub points: u32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,

    // Accumulated raw fanta score. Doubles as the tie-break criterium.
    pub fanta_points: f64,
}

// Basics.
impl Standings {
    fn build(competition_id: CompetitionId, team_id: TeamId) -> Self {
        Self {
            competition_id: competition_id,
            team_id: team_id,
            ..Default::default()
        }
    }

    // Create one zero-valued row per participant.
    pub fn initialize(comp: &Competition) {
        let mut standings = STANDINGS.lock().unwrap();
        for team_id in comp.participants.iter() {
            standings.insert((comp.id, *team_id), Self::build(comp.id, *team_id));
        }
    }

    pub fn fetch_from_db(competition_id: &CompetitionId, team_id: &TeamId) -> Result<Self> {
        match STANDINGS.lock().unwrap().get(&(*competition_id, *team_id)) {
            Some(row) => Ok(row.clone()),
            _ => Err(Error::not_found("standings row for team", team_id)),
        }
    }

    // Update the row to the database.
    pub fn save(&self) {
        STANDINGS.lock().unwrap().insert((self.competition_id, self.team_id), self.clone());
    }

    // Remove every row of a competition. Only competition deletion cascades
    // here; nothing else ever deletes a row.
    pub fn delete_competition_rows(competition_id: &CompetitionId) {
        STANDINGS.lock().unwrap().retain(|key, _| key.0 != *competition_id);
    }
}

// Updates.
impl Standings {
    // Apply placement points and the tie-break contribution for one match
    // day. The row must have been created with the competition.
    pub fn apply_result(competition_id: &CompetitionId, team_id: &TeamId, points: u32, fanta_points: f64) -> Result<()> {
        let mut row = Self::fetch_from_db(competition_id, team_id)?;

        row.points += points;
        row.fanta_points += fanta_points;
        row.played += 1;
        row.save();

        Ok(())
    }

    // Take one match day's contribution back out, so the day can be scored
    // again from scratch.
    pub fn revert_result(competition_id: &CompetitionId, team_id: &TeamId, points: u32, fanta_points: f64) -> Result<()> {
        let mut row = Self::fetch_from_db(competition_id, team_id)?;

        row.points -= points;
        row.fanta_points -= fanta_points;
        row.played -= 1;
        row.save();

        Ok(())
    }

    // Fold a literal score into the goal-based counters. Race competitions
    // never come through here; their table moves on placement points only.
    pub fn record_score(comp: &Competition, team_id: &TeamId, goals_for: u32, goals_against: u32) -> Result<()> {
        let mut row = Self::fetch_from_db(&comp.id, team_id)?;

        row.played += 1;
        row.goals_for += goals_for;
        row.goals_against += goals_against;
        row.goal_difference = row.goals_for as i32 - row.goals_against as i32;

        if goals_for > goals_against {
            row.won += 1;
            if comp.format == Format::League {
                row.points += 3;
            }
        }
        else if goals_for == goals_against {
            row.drawn += 1;
            if comp.format == Format::League {
                row.points += 1;
            }
        }
        else {
            row.lost += 1;
        }

        row.save();
        Ok(())
    }

    // Set the group a row belongs to once group assignment is known.
    pub fn assign_group(competition_id: &CompetitionId, team_id: &TeamId, group_name: &str) -> Result<()> {
        let mut row = Self::fetch_from_db(competition_id, team_id)?;
        row.group_name = Some(group_name.to_string());
        row.save();
        Ok(())
    }
}

// Output.
impl Standings {
    // Get a competition's rows ranked for display: points first, the
    // tie-break score second, team ID as the final deterministic criterium.
    pub fn ranked(competition_id: &CompetitionId) -> Vec<Self> {
        let mut rows: Vec<Self> = STANDINGS.lock().unwrap()
            .values()
            .filter(|row| row.competition_id == *competition_id)
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            b.points.cmp(&a.points)
                .then(b.fanta_points.total_cmp(&a.fanta_points))
                .then(a.team_id.cmp(&b.team_id))
        });
        return rows;
    }

    // Ranked rows partitioned by group, in group name order. Rows without a
    // group (the knockout qualifiers) come first under an empty name.
    pub fn ranked_by_group(competition_id: &CompetitionId) -> Vec<(String, Vec<Self>)> {
        let mut groups: Vec<(String, Vec<Self>)> = Vec::new();

        for row in Self::ranked(competition_id) {
            let name = match &row.group_name {
                Some(name) => name.clone(),
                _ => String::new(),
            };

            match groups.iter_mut().find(|(group, _)| *group == name) {
                Some((_, rows)) => rows.push(row),
                _ => groups.push((name, vec![row])),
            }
        }

        groups.sort_by(|a, b| a.0.cmp(&b.0));
        return groups;
    }

    // Get JSON for a competition screen.
    pub fn comp_screen_package(&self) -> Result<serde_json::Value> {
        let team = Team::fetch_from_db(&self.team_id)?;

        Ok(json!({
            "team_id": self.team_id,
            "team": team.name,
            "group": self.group_name,
            "points": self.points,
            "played": self.played,
            "won": self.won,
            "drawn": self.drawn,
            "lost": self.lost,
            "goals_for": self.goals_for,
            "goals_against": self.goals_against,
            "goal_difference": self.goal_difference,
            "fanta_points": self.fanta_points,
        }))
    }
}
