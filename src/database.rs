// The in-memory database. Every record lives in a process-wide store keyed
// by its ID; durable persistence belongs to the surrounding application.

use std::collections::HashMap;
use std::sync::Mutex;

use lazy_static::lazy_static;

use crate::{
    competition::{scoring::AppliedResult, standings::Standings, Competition},
    formation::Formation,
    match_event::Match,
    player::Player,
    team::Team,
    types::{CompetitionId, MatchDay, MatchId, PlayerId, TeamId},
    vote::Vote,
};

lazy_static! {
    pub static ref TEAMS: Mutex<HashMap<TeamId, Team>> = Mutex::new(HashMap::new());
    pub static ref PLAYERS: Mutex<HashMap<PlayerId, Player>> = Mutex::new(HashMap::new());
    pub static ref COMPETITIONS: Mutex<HashMap<CompetitionId, Competition>> = Mutex::new(HashMap::new());
    pub static ref MATCHES: Mutex<HashMap<MatchId, Match>> = Mutex::new(HashMap::new());

    // One row per (competition, team), created when the competition is.
    pub static ref STANDINGS: Mutex<HashMap<(CompetitionId, TeamId), Standings>> = Mutex::new(HashMap::new());

    // One lineup per (team, match day).
    pub static ref FORMATIONS: Mutex<HashMap<(TeamId, MatchDay), Formation>> = Mutex::new(HashMap::new());

    // One record per (player, match day), deposited by the external vote
    // ingestion pipeline. Read-only to this crate's algorithms.
    pub static ref VOTES: Mutex<HashMap<(PlayerId, MatchDay), Vote>> = Mutex::new(HashMap::new());

    // Placement points already applied per (competition, match day), so a
    // scored day can be reverted before it is scored again.
    pub static ref SCORED_DAYS: Mutex<HashMap<(CompetitionId, MatchDay), Vec<AppliedResult>>> = Mutex::new(HashMap::new());
}
