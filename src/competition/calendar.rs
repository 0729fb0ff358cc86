// Calendar generation for every competition format. Generation always
// replaces the previous match set of the competition as one unit, and all
// validation happens before anything is deleted.

use rand::seq::SliceRandom;

use crate::{
    error::{Error, Result},
    match_event::Match,
    types::{convert, MatchDay, TeamId},
};

use super::{round_robin, standings::Standings, Competition, CompetitionConfig, Format};

// Check everything that could make generation fail, before the previous
// calendar is touched.
pub fn validate(format: Format, num_teams: usize, config: &CompetitionConfig) -> Result<()> {
    if num_teams < 2 {
        return Err(Error::InvalidState(format!("{num_teams} team(s) is not enough for a competition")));
    }

    match format {
        Format::Cup => validate_bracket_size(num_teams)?,
        Format::GroupCup => {
            if config.num_groups == 0 {
                return Err(Error::InvalidState("a group stage needs at least one group".to_string()));
            }
            if config.matches_per_team == 0 {
                return Err(Error::InvalidState("a group stage needs at least one match per team".to_string()));
            }

            // A knockout stage only exists when at least two teams qualify.
            let qualified = config.num_groups * config.teams_qualify_per_group;
            if qualified >= 2 {
                validate_bracket_size(qualified)?;
            }
        }
        _ => {}
    }

    Ok(())
}

// Knockout fields must come in powers of two; anything else would silently
// drop teams from the bracket.
fn validate_bracket_size(num_teams: usize) -> Result<()> {
    if num_teams < 2 || !num_teams.is_power_of_two() {
        return Err(Error::InvalidState(format!("a knockout bracket needs a power-of-two field, got {num_teams} teams")));
    }
    Ok(())
}

// Generate the competition's calendar, replacing any previous one.
pub fn generate(comp: &Competition, config: &CompetitionConfig) -> Result<()> {
    validate(comp.format, comp.participants.len(), config)?;
    Match::delete_competition_matches(&comp.id);

    match comp.format {
        Format::League => generate_league_calendar(comp),
        Format::Cup => generate_cup_bracket(comp, config),
        Format::GroupCup => generate_group_cup(comp, config)?,

        // Race competitions run on votes alone; there is no fixture list.
        Format::Race => {}
    }

    log::info!("generated calendar for competition {} ({:?})", comp.id, comp.format);
    Ok(())
}

// Expand the base round-robin cycle across the competition's whole day
// range. Odd cycles swap home and away, which yields the return legs, and
// ranges longer than two cycles repeat the pattern.
fn generate_league_calendar(comp: &Competition) {
    let base_rounds = round_robin::generate_rounds(&comp.participants);
    let num_base_rounds = base_rounds.len();

    for day in comp.start_day..=comp.end_day {
        let relative_day = convert::int::<MatchDay, usize>(day - comp.start_day);
        let round_index = relative_day % num_base_rounds;
        let cycle_index = relative_day / num_base_rounds;

        // Swap on odd cycles (return leg).
        let swap = cycle_index % 2 != 0;

        for (home, away) in base_rounds[round_index].iter() {
            let mut game = Match::build(comp.id, day);
            game.home_team = Some(if swap { *away } else { *home });
            game.away_team = Some(if swap { *home } else { *away });
            game.save_new();
        }
    }
}

// Build a knockout cup. The bracket keeps seed order unless the draw is
// randomised.
fn generate_cup_bracket(comp: &Competition, config: &CompetitionConfig) {
    let mut teams = comp.participants.clone();
    if config.random_brackets {
        teams.shuffle(&mut rand::rng());
    }

    build_bracket(
        comp, teams.len(), comp.start_day, Some(&teams),
        config.rounds_home_away, config.final_home_away,
    );
}

// Partition the field into groups, play a round robin inside each group and
// top the stage with a knockout bracket for the qualifiers.
fn generate_group_cup(comp: &Competition, config: &CompetitionConfig) -> Result<()> {
    let mut teams = comp.participants.clone();
    if config.random_groups {
        teams.shuffle(&mut rand::rng());
    }

    let base_size = teams.len() / config.num_groups;
    let remainder = teams.len() % config.num_groups;

    let mut next_team = 0;
    let mut max_match_day = comp.start_day;

    for group_index in 0..config.num_groups {
        let group_name = format!("Group {}", group_letter(group_index));

        // The first groups absorb the remainder, one extra team each.
        let group_size = base_size + if group_index < remainder { 1 } else { 0 };
        let group_teams: Vec<TeamId> = teams[next_team..next_team + group_size].to_vec();
        next_team += group_size;

        for team_id in group_teams.iter() {
            Standings::assign_group(&comp.id, team_id, &group_name)?;
        }

        let last_day = generate_group_matches(comp, &group_teams, config.matches_per_team, &group_name);
        if last_day > max_match_day {
            max_match_day = last_day;
        }
    }

    // Knockout placeholders for the qualifiers, anchored after the slowest
    // group has finished.
    let qualified = config.num_groups * config.teams_qualify_per_group;
    if qualified >= 2 {
        build_bracket(
            comp, qualified, max_match_day + 1, None,
            config.knockout_home_away, config.final_group_home_away,
        );
    }

    Ok(())
}

// Round robin inside one group, anchored at the competition start day.
// Repeated legs mirror home and away.
fn generate_group_matches(comp: &Competition, group_teams: &[TeamId], matches_per_team: u32, group_name: &str) -> MatchDay {
    let rounds = round_robin::generate_rounds(group_teams);
    let num_rounds = rounds.len();
    let mut last_day = comp.start_day;

    for cycle in 0..matches_per_team as usize {
        let swap = cycle % 2 != 0;

        for (round_index, round) in rounds.iter().enumerate() {
            let matchday_number = cycle * num_rounds + round_index + 1;
            let day = comp.start_day + convert::int::<usize, MatchDay>(matchday_number) - 1;

            for (home, away) in round.iter() {
                let mut game = Match::build(comp.id, day);
                game.group_name = Some(group_name.to_string());
                game.round_label = Some(format!("{group_name} - Matchday {matchday_number}"));
                game.home_team = Some(if swap { *away } else { *home });
                game.away_team = Some(if swap { *home } else { *away });
                game.save_new();
            }

            if day > last_day {
                last_day = day;
            }
        }
    }

    return last_day;
}

// Lay down one knockout bracket. The first round takes its pairings from
// the seed list when one is given; every later slot stays unresolved until
// a prior round completes. Each leg occupies one match day.
fn build_bracket(
    comp: &Competition, num_teams: usize, start_day: MatchDay,
    first_round_teams: Option<&[TeamId]>,
    rounds_home_away: bool, final_home_away: bool,
) {
    let num_rounds = num_teams.ilog2() as usize;
    let mut current_day = start_day;

    for round in 1..=num_rounds {
        let is_final = round == num_rounds;
        let home_away = if is_final { final_home_away } else { rounds_home_away };
        let matches_in_round = num_teams >> round;
        let label = round_label(round, num_rounds);

        let legs = if home_away { 2 } else { 1 };
        for leg in 0..legs {
            for number in 0..matches_in_round {
                let mut game = Match::build(comp.id, current_day);
                game.round_number = Some(convert::int::<usize, u32>(round));
                game.match_number = Some(convert::int::<usize, u32>(number + 1));
                game.round_label = match leg {
                    0 => Some(label.clone()),
                    _ => Some(format!("{label} (Return leg)")),
                };

                if round == 1 {
                    if let Some(teams) = first_round_teams {
                        // The return leg reverses the orientation.
                        let (home, away) = match leg {
                            0 => (teams[number * 2], teams[number * 2 + 1]),
                            _ => (teams[number * 2 + 1], teams[number * 2]),
                        };
                        game.home_team = Some(home);
                        game.away_team = Some(away);
                    }
                }

                game.save_new();
            }
            current_day += 1;
        }
    }
}

// Knockout round names, by distance from the final.
fn round_label(round: usize, total_rounds: usize) -> String {
    match total_rounds - round {
        0 => "Final".to_string(),
        1 => "Semifinal".to_string(),
        2 => "Quarterfinal".to_string(),
        3 => "Round of 16".to_string(),
        4 => "Round of 32".to_string(),
        _ => format!("Round {round}"),
    }
}

// Group names are assigned letter-sequentially.
fn group_letter(group_index: usize) -> char {
    (b'A' + group_index as u8) as char
}
