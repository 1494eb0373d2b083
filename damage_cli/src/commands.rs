//! Subcommands of damage-cli

use crate::app::{read_input, App};
use anyhow::{bail, Result};
use clap::Args;
use combat_core::artifact::{recommend_sets, SetRecommendation};
use combat_core::bond::{analyze_bond, bond_state_for, simulate_healing, BondAnalysis, HealingSimulation};
use combat_core::reaction::analyze_reactions;
use combat_core::{BuildRecord, Element, EnemyProfile};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn read_enemy(path: Option<&Path>) -> Result<EnemyProfile> {
    match path {
        Some(path) => read_input(path),
        None => Ok(EnemyProfile::default()),
    }
}

/// Damage of a single character
#[derive(Args)]
pub struct CharacterCmd {
    /// Build record file (.json or .toml)
    #[arg(long)]
    build: PathBuf,

    /// Enemy profile file (level 90, 10% resistance when omitted)
    #[arg(long)]
    enemy: Option<PathBuf>,

    /// Reaction to evaluate, repeatable ("vaporize", "melt", "overloaded", "swirl", ...)
    #[arg(long = "reaction")]
    reactions: Vec<String>,
}

impl CharacterCmd {
    pub fn execute(self, app: &App) -> Result<()> {
        let record: BuildRecord = read_input(&self.build)?;
        let enemy = read_enemy(self.enemy.as_deref())?;
        debug!(character = %record.character, reactions = ?self.reactions, "character request");

        let report = app.calculator().calculate_character(&record, &enemy, &self.reactions);
        app.emit(&report)
    }
}

/// Damage of a main character inside a team
#[derive(Args)]
pub struct TeamCmd {
    /// Build record file (.json or .toml) of the main character
    #[arg(long)]
    build: PathBuf,

    /// Comma-separated roster, main character included
    #[arg(long, value_delimiter = ',', required = true)]
    team: Vec<String>,

    /// Enemy profile file
    #[arg(long)]
    enemy: Option<PathBuf>,
}

impl TeamCmd {
    pub fn execute(self, app: &App) -> Result<()> {
        let record: BuildRecord = read_input(&self.build)?;
        let enemy = read_enemy(self.enemy.as_deref())?;
        let roster: Vec<String> = self.team.iter().map(|n| n.trim().to_string()).collect();

        let report = app.calculator().calculate_team(&record, &roster, &enemy);
        app.emit(&report)
    }
}

/// Reactions a team can produce
#[derive(Args)]
pub struct ReactionsCmd {
    /// Comma-separated roster
    #[arg(long, value_delimiter = ',', required = true)]
    team: Vec<String>,

    /// Main character (first roster member when omitted)
    #[arg(long)]
    main: Option<String>,
}

impl ReactionsCmd {
    pub fn execute(self, app: &App) -> Result<()> {
        let roster: Vec<String> = self.team.iter().map(|n| n.trim().to_string()).collect();
        let main = match self.main.or_else(|| roster.first().cloned()) {
            Some(main) => main,
            None => bail!("--team needs at least one member"),
        };

        let analysis = analyze_reactions(&roster, &main, app.tables(), app.constants());
        info!(
            main = %main,
            possible = analysis.possible_reactions.len(),
            recommended = ?analysis.recommended_reactions,
            "reactions analyzed"
        );
        app.emit(&analysis)
    }
}

/// Recommended artifact sets
#[derive(Args)]
pub struct SetsCmd {
    /// Element name ("pyro", "hydro", ...)
    #[arg(long, conflicts_with = "character")]
    element: Option<String>,

    /// Character whose element picks the recommendations
    #[arg(long)]
    character: Option<String>,
}

#[derive(Serialize)]
struct SetsOutput {
    element: Element,
    recommendations: Vec<SetRecommendation>,
}

impl SetsCmd {
    pub fn execute(self, app: &App) -> Result<()> {
        let element = match (&self.element, &self.character) {
            (Some(name), _) => match Element::from_name(name) {
                Some(element) => element,
                None => bail!("unknown element: {}", name),
            },
            (None, Some(character)) => match app.tables().element_of(character) {
                Some(element) => element,
                None => bail!("unknown character: {}", character),
            },
            (None, None) => bail!("either --element or --character is required"),
        };

        let recommendations = recommend_sets(element, app.tables());
        app.emit(&SetsOutput {
            element,
            recommendations,
        })
    }
}

/// Bond of Life bonus and healing simulation
#[derive(Args)]
pub struct BondCmd {
    #[arg(long)]
    character: String,

    /// Bond value in % of max HP (engine default when omitted)
    #[arg(long)]
    value: Option<f64>,

    /// Heals in HP, applied in order
    #[arg(long = "heal", value_delimiter = ',', default_values_t = [800.0, 1500.0, 1200.0, 2000.0])]
    heals: Vec<f64>,

    /// Max HP used to convert heals (character's no-gear HP when omitted)
    #[arg(long)]
    max_hp: Option<f64>,
}

#[derive(Serialize)]
struct BondOutput {
    analysis: BondAnalysis,
    max_hp: f64,
    simulation: HealingSimulation,
}

impl BondCmd {
    pub fn execute(self, app: &App) -> Result<()> {
        let calculator = app.calculator();
        let prepared = calculator.prepare(&BuildRecord::new(self.character.as_str()));
        let entry = &prepared.build.entry;
        let value = self.value.unwrap_or(app.constants().bond.assumed_value);

        let state = bond_state_for(entry, value, app.constants());
        let analysis = analyze_bond(entry, &prepared.build.stats, state.clone());
        let max_hp = self.max_hp.unwrap_or_else(|| prepared.build.stats.total_hp());
        let simulation = simulate_healing(state, &self.heals, max_hp);

        info!(
            character = %analysis.character,
            active = analysis.is_active(),
            blocked = simulation.total_healing_blocked,
            "bond simulated"
        );
        app.emit(&BondOutput {
            analysis,
            max_hp,
            simulation,
        })
    }
}

#[cfg(test)]
mod tests {
    use combat_core::ReactionType;

    #[test]
    fn test_documented_reaction_names_parse() {
        for name in ["vaporize", "melt", "overloaded", "swirl"] {
            assert!(ReactionType::from_name(name).is_some(), "{}", name);
        }
    }
}
