// Match-day scoring: team totals from lineups and vote records, placement
// points into the standings table.

use serde::{Deserialize, Serialize};

use crate::{
    database::SCORED_DAYS,
    error::{Error, Result},
    formation::Formation,
    player::{Player, Role},
    types::{CompetitionId, MatchDay, PlayerId, TeamId},
    vote::Vote,
};

use super::{standings::Standings, Competition, Format};

// Placement points ladder, best score first. Positions beyond the ladder
// score nothing.
const PLACEMENT_POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

// One team's applied contribution for a scored match day. Kept in the
// database so the day can be reverted and scored again.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone)]
pub struct AppliedResult {
    pub team_id: TeamId,
    pub points: u32,
    pub fanta_points: f64,
}

// Score a match day for a Race competition: compute every participant's
// total, rank them and hand out placement points. Scoring the same day
// again first reverts the previously applied points, so the operation can
// be repeated safely after late vote corrections.
pub fn score_match_day(competition_id: &CompetitionId, match_day: MatchDay) -> Result<()> {
    let comp = Competition::fetch_from_db(competition_id)?;

    // Days outside the competition's range are ignored.
    if !comp.contains_day(match_day) {
        log::debug!("match day {match_day} is outside competition {competition_id}'s range");
        return Ok(());
    }

    if comp.format != Format::Race {
        return Err(Error::UnsupportedFormat(comp.format));
    }

    revert_match_day(&comp, match_day)?;

    // Scores in participant order; the stable sort keeps that order for
    // equal scores.
    let mut scores: Vec<(TeamId, f64)> = comp.participants.iter()
        .map(|team_id| (*team_id, compute_team_score(team_id, match_day)))
        .collect();
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut applied = Vec::new();
    for (position, (team_id, score)) in scores.iter().enumerate() {
        let points = match PLACEMENT_POINTS.get(position) {
            Some(points) => *points,
            _ => 0,
        };

        Standings::apply_result(&comp.id, team_id, points, *score)?;
        applied.push(AppliedResult {
            team_id: *team_id,
            points: points,
            fanta_points: *score,
        });
    }

    SCORED_DAYS.lock().unwrap().insert((comp.id, match_day), applied);
    log::info!("scored match day {match_day} for competition {} ({} teams)", comp.id, scores.len());
    Ok(())
}

// Compute one team's total for a match day from its lineup and the vote
// records. A missing lineup scores zero.
pub fn compute_team_score(team_id: &TeamId, match_day: MatchDay) -> f64 {
    match Formation::fetch_from_db(team_id, match_day) {
        Some(formation) => formation_score(&formation, match_day),
        _ => {
            log::debug!("team {team_id} fielded no formation for match day {match_day}");
            return 0.0;
        }
    }
}

// Sum the fanta votes of the starting slots. A starter without a usable
// vote is covered by the first same-role bench player that has one; each
// bench player covers at most one vacancy. Slots nobody can fill
// contribute zero.
pub fn formation_score(formation: &Formation, match_day: MatchDay) -> f64 {
    let mut total = 0.0;
    let mut used_bench: Vec<PlayerId> = Vec::new();

    for (player_id, role) in formation.starters() {
        match usable_vote(&player_id, match_day) {
            Some(fanta_vote) => total += fanta_vote,
            _ => {
                if let Some((substitute, fanta_vote)) = find_substitute(formation, role, match_day, &used_bench) {
                    log::debug!("bench player {substitute} covers for {player_id} on match day {match_day}");
                    used_bench.push(substitute);
                    total += fanta_vote;
                }
            }
        }
    }

    return total;
}

// Get a player's fanta vote for the day, if one can be resolved.
fn usable_vote(player_id: &PlayerId, match_day: MatchDay) -> Option<f64> {
    Vote::fetch_from_db(player_id, match_day)?.resolve_fanta_vote()
}

// Search the bench in priority order for an unused player of the right role
// with a resolvable vote. Bench entries pointing at unknown players are
// skipped.
fn find_substitute(formation: &Formation, role: Role, match_day: MatchDay, used_bench: &[PlayerId]) -> Option<(PlayerId, f64)> {
    for player_id in formation.bench.iter() {
        if used_bench.contains(player_id) {
            continue;
        }

        let player = match Player::fetch_from_db(player_id) {
            Ok(player) => player,
            _ => continue,
        };
        if player.role != role {
            continue;
        }

        if let Some(fanta_vote) = usable_vote(player_id, match_day) {
            return Some((*player_id, fanta_vote));
        }
    }

    None
}

// Take a previously scored day's contribution back out of the standings.
fn revert_match_day(comp: &Competition, match_day: MatchDay) -> Result<()> {
    let applied = SCORED_DAYS.lock().unwrap().remove(&(comp.id, match_day));

    if let Some(applied) = applied {
        for result in applied.iter() {
            Standings::revert_result(&comp.id, &result.team_id, result.points, result.fanta_points)?;
        }
    }

    Ok(())
}

// Drop the scoring records of a deleted competition.
pub fn delete_competition_records(competition_id: &CompetitionId) {
    SCORED_DAYS.lock().unwrap().retain(|key, _| key.0 != *competition_id);
}
