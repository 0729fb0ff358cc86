// Fantasy teams. Teams are supplied by the surrounding application; the
// engine only needs their identity and display data.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{database::TEAMS, error::{Error, Result}, types::TeamId};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone)]
pub struct Team {
    pub id: TeamId,
    pub name: String,

    // Name of the owning manager. Referential only.
    pub manager: String,
}

// Basics.
impl Team {
    pub fn build(name: &str, manager: &str) -> Self {
        Self {
            name: name.to_string(),
            manager: manager.to_string(),
            ..Default::default()
        }
    }

    // Build a team and save it to the database.
    pub fn build_and_save(name: &str, manager: &str) -> Self {
        let mut team = Self::build(name, manager);
        team.save_new();
        return team;
    }

    // Save a team to the database for the first time.
    fn save_new(&mut self) {
        let mut teams = TEAMS.lock().unwrap();
        self.id = match teams.keys().max() {
            Some(n) => n + 1,
            _ => 1,
        };
        teams.insert(self.id, self.clone());
    }

    pub fn fetch_from_db(id: &TeamId) -> Result<Self> {
        match TEAMS.lock().unwrap().get(id) {
            Some(team) => Ok(team.clone()),
            _ => Err(Error::not_found("team", id)),
        }
    }

    // Update the team to the database.
    pub fn save(&self) {
        TEAMS.lock().unwrap().insert(self.id, self.clone());
    }

    // Get JSON for a competition screen.
    pub fn comp_screen_package(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.name,
            "manager": self.manager,
        })
    }
}
