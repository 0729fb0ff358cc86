// Players and their positional roles. Substitutions are only legal between
// players of the same role.

use serde::{Deserialize, Serialize};

use crate::{database::PLAYERS, error::{Error, Result}, types::PlayerId};

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[default]
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

#[derive(Debug, Serialize, Deserialize)]
#[derive(Default, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
}

// Basics.
impl Player {
    pub fn build(name: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            role: role,
            ..Default::default()
        }
    }

    // Build a player and save it to the database.
    pub fn build_and_save(name: &str, role: Role) -> Self {
        let mut player = Self::build(name, role);
        player.save_new();
        return player;
    }

    // Save a player to the database for the first time.
    fn save_new(&mut self) {
        let mut players = PLAYERS.lock().unwrap();
        self.id = match players.keys().max() {
            Some(n) => n + 1,
            _ => 1,
        };
        players.insert(self.id, self.clone());
    }

    pub fn fetch_from_db(id: &PlayerId) -> Result<Self> {
        match PLAYERS.lock().unwrap().get(id) {
            Some(player) => Ok(player.clone()),
            _ => Err(Error::not_found("player", id)),
        }
    }

    // Update the player to the database.
    pub fn save(&self) {
        PLAYERS.lock().unwrap().insert(self.id, self.clone());
    }
}
