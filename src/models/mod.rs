use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::FightError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fight {
    pub id: String,
    // Kept as the stored string so an odd timestamp never blocks a load;
    // rendering falls back to the raw value.
    pub created_at: String,
    pub foods: [String; 2],
    #[serde(default)]
    pub votes: BTreeMap<String, String>,
}

/// The whole persisted state: at most one running fight plus every fight
/// retired before it, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Fight>,
    #[serde(default)]
    pub history: Vec<Fight>,
}

/// What a recorded vote did to the voter's entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    New,
    Changed { previous: String },
    Unchanged,
}

impl Fight {
    pub fn new(food_a: String, food_b: String) -> Result<Self, FightError> {
        validate_label("contestant", &food_a)?;
        validate_label("contestant", &food_b)?;
        if food_a == food_b {
            return Err(FightError::InvalidInput(format!(
                "contestants must differ, got {} twice",
                food_a
            )));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            foods: [food_a, food_b],
            votes: BTreeMap::new(),
        })
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn allows(&self, choice: &str) -> bool {
        self.foods.iter().any(|food| food == choice)
    }
}

impl FightDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Fight> {
        self.active.as_ref()
    }

    /// Start a new fight between `food_a` and `food_b`.
    ///
    /// A fight that is already running is moved to the end of `history`
    /// with whatever votes it has collected. This is the only place that
    /// replaces `active` or grows `history`.
    pub fn start_fight(&mut self, food_a: &str, food_b: &str) -> Result<&Fight, FightError> {
        // Build first so a rejected label leaves the document untouched.
        let fight = Fight::new(food_a.to_string(), food_b.to_string())?;

        if let Some(previous) = self.active.take() {
            info!(
                "Archiving fight {} ({} vs {}) with {} vote(s)",
                previous.id,
                previous.foods[0],
                previous.foods[1],
                previous.votes.len()
            );
            self.history.push(previous);
        }

        info!("Created fight {} ({} vs {})", fight.id, fight.foods[0], fight.foods[1]);
        Ok(&*self.active.insert(fight))
    }

    /// Record `voter_id`'s choice in the active fight, replacing any earlier
    /// choice by the same voter.
    pub fn record_vote(&mut self, voter_id: &str, choice: &str) -> Result<VoteOutcome, FightError> {
        let fight = self.active.as_mut().ok_or(FightError::NoActiveFight)?;
        validate_label("voter id", voter_id)?;

        if !fight.allows(choice) {
            return Err(FightError::InvalidChoice {
                choice: choice.to_string(),
                allowed: fight.foods.clone(),
            });
        }

        let outcome = match fight.votes.insert(voter_id.to_string(), choice.to_string()) {
            None => VoteOutcome::New,
            Some(previous) if previous == choice => VoteOutcome::Unchanged,
            Some(previous) => VoteOutcome::Changed { previous },
        };

        info!("Recorded vote in fight {}: {} -> {} ({:?})", fight.id, voter_id, choice, outcome);
        Ok(outcome)
    }
}

fn validate_label(what: &str, value: &str) -> Result<(), FightError> {
    if value.is_empty() {
        return Err(FightError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(())
}
