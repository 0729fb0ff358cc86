// Competitions and their lifecycle. A competition owns its calendar and its
// standings rows; matches refer back to it by ID only.

pub mod calendar;
pub mod round_robin;
pub mod scoring;
pub mod standings;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    database::COMPETITIONS,
    error::{Error, Result},
    match_event::Match,
    team::Team,
    types::{CompetitionId, LeagueId, MatchDay, TeamId},
};

use self::standings::Standings;

// How a competition schedules its matches and accumulates its table.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    #[default]
    League,
    Cup,
    GroupCup,

    // No fixtures; every team races for the day's best fanta score and the
    // table moves on placement points.
    Race,
}

// Knobs for calendar generation. Formats ignore the knobs that do not
// concern them.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone)]
pub struct CompetitionConfig {
    pub rounds_home_away: bool,
    pub final_home_away: bool,
    pub random_brackets: bool,

    pub num_groups: usize,
    pub matches_per_team: u32,
    pub teams_qualify_per_group: usize,
    pub knockout_home_away: bool,
    pub final_group_home_away: bool,
    pub random_groups: bool,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            rounds_home_away: false,
            final_home_away: false,
            random_brackets: false,
            num_groups: 1,
            matches_per_team: 1,
            teams_qualify_per_group: 0,
            knockout_home_away: false,
            final_group_home_away: false,
            random_groups: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone)]
pub struct Competition {
    pub id: CompetitionId,
    pub league_id: LeagueId,
    pub name: String,
    pub format: Format,

    // Inclusive match-day range the competition occupies.
    pub start_day: MatchDay,
    pub end_day: MatchDay,

    // Participant teams in seed order. Fixed once a calendar exists.
    pub participants: Vec<TeamId>,
}

// Basics.
impl Competition {
    fn build(league_id: LeagueId, name: &str, format: Format, start_day: MatchDay, end_day: MatchDay, participants: Vec<TeamId>) -> Self {
        Self {
            league_id: league_id,
            name: name.to_string(),
            format: format,
            start_day: start_day,
            end_day: end_day,
            participants: participants,
            ..Default::default()
        }
    }

    // Create a competition: validate, save, seed the standings table and
    // generate the full calendar. Nothing is written when validation fails.
    pub fn create(
        league_id: LeagueId, name: &str, format: Format,
        start_day: MatchDay, end_day: MatchDay,
        participants: Vec<TeamId>, config: &CompetitionConfig,
    ) -> Result<Self> {
        if start_day > end_day {
            return Err(Error::InvalidState(format!("day range [{start_day}, {end_day}] is inverted")));
        }
        calendar::validate(format, participants.len(), config)?;

        let mut comp = Self::build(league_id, name, format, start_day, end_day, participants);
        comp.save_new();

        Standings::initialize(&comp);
        calendar::generate(&comp, config)?;

        log::info!("created competition {} ({:?}) with {} teams", comp.id, comp.format, comp.participants.len());
        return Ok(comp);
    }

    // Save a competition to the database for the first time.
    fn save_new(&mut self) {
        let mut comps = COMPETITIONS.lock().unwrap();
        self.id = match comps.keys().max() {
            Some(n) => n + 1,
            _ => 1,
        };
        comps.insert(self.id, self.clone());
    }

    pub fn fetch_from_db(id: &CompetitionId) -> Result<Self> {
        match COMPETITIONS.lock().unwrap().get(id) {
            Some(comp) => Ok(comp.clone()),
            _ => Err(Error::not_found("competition", id)),
        }
    }

    // Update the competition to the database.
    pub fn save(&self) {
        COMPETITIONS.lock().unwrap().insert(self.id, self.clone());
    }

    // Delete a competition together with its matches, standings rows and
    // scoring records.
    pub fn delete(id: &CompetitionId) -> Result<()> {
        let comp = Self::fetch_from_db(id)?;

        Match::delete_competition_matches(&comp.id);
        Standings::delete_competition_rows(&comp.id);
        scoring::delete_competition_records(&comp.id);
        COMPETITIONS.lock().unwrap().remove(&comp.id);

        log::info!("deleted competition {} and its calendar", comp.id);
        Ok(())
    }
}

// Functional.
impl Competition {
    // Check whether a match day belongs to the competition's range.
    pub fn contains_day(&self, match_day: MatchDay) -> bool {
        match_day >= self.start_day && match_day <= self.end_day
    }

    // Rebuild the calendar from scratch. Safe to repeat: the previous match
    // set is replaced as one unit.
    pub fn regenerate_calendar(id: &CompetitionId, config: &CompetitionConfig) -> Result<()> {
        let comp = Self::fetch_from_db(id)?;
        calendar::generate(&comp, config)
    }

    // Get the calendar, ordered by match day.
    pub fn calendar(&self) -> Vec<Match> {
        Match::fetch_competition_matches(&self.id)
    }

    // Get the participant teams in seed order.
    pub fn teams(&self) -> Result<Vec<Team>> {
        let mut teams = Vec::new();
        for id in self.participants.iter() {
            teams.push(Team::fetch_from_db(id)?);
        }
        return Ok(teams);
    }

    // Get JSON for a competition screen: the calendar plus the ranked table.
    pub fn comp_screen_package(&self) -> Result<serde_json::Value> {
        let calendar: Vec<serde_json::Value> = self.calendar().iter()
            .map(|game| game.comp_screen_package())
            .collect();

        let mut table = Vec::new();
        for row in Standings::ranked(&self.id) {
            table.push(row.comp_screen_package()?);
        }

        Ok(json!({
            "id": self.id,
            "name": self.name,
            "format": self.format,
            "start_day": self.start_day,
            "end_day": self.end_day,
            "calendar": calendar,
            "standings": table,
        }))
    }
}
