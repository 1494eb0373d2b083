//! Reference tables: immutable, load-once lookup data
//!
//! Character base stats and talents, artifact set bonuses, team buffs,
//! elemental resonances, the reaction table and transformative multipliers.
//! The built-in tables are embedded TOML parsed once on first use. Lookups
//! never fail: a miss returns a documented default (the generic archetype,
//! no set bonus, no buffs, multiplier 0).

use super::{load_toml, parse_toml, ConfigError};
use crate::artifact::{SetBonusDef, SetRecommendations};
use crate::bond::BondRule;
use crate::reaction::ReactionEntry;
use crate::stat_block::StatKind;
use crate::team::{ResonanceDef, TeamBuffDef};
use crate::types::{normalize_name, AbilityType, Element, ReactionType, ScalingAttribute, WeaponType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, error};

const CHARACTERS_FILE: &str = "characters.toml";
const ARTIFACT_SETS_FILE: &str = "artifact_sets.toml";
const TEAM_BUFFS_FILE: &str = "team_buffs.toml";
const REACTIONS_FILE: &str = "reactions.toml";

/// Level-90 base stats for a character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseStats {
    pub base_atk: f64,
    pub base_hp: f64,
    pub base_def: f64,
    /// Stat granted by ascension
    pub ascension_stat: StatKind,
    pub ascension_value: f64,
}

impl Default for BaseStats {
    fn default() -> Self {
        BaseStats {
            base_atk: 800.0,
            base_hp: 12000.0,
            base_def: 700.0,
            ascension_stat: StatKind::AtkPercent,
            ascension_value: 24.0,
        }
    }
}

/// Per-ability scaling override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentOverride {
    pub ability: AbilityType,
    pub scaling: ScalingAttribute,
}

/// Level-10 talent multipliers (percent of the scaling attribute)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentMultipliers {
    /// One entry per hit of the normal attack chain
    pub normal_attack: Vec<f64>,
    pub charged_attack: f64,
    pub plunge_attack: f64,
    pub elemental_skill: f64,
    pub elemental_burst: f64,
    /// Attribute every ability scales with unless overridden
    #[serde(default)]
    pub scaling: ScalingAttribute,
    #[serde(default)]
    pub overrides: Vec<TalentOverride>,
}

impl Default for TalentMultipliers {
    fn default() -> Self {
        TalentMultipliers {
            normal_attack: vec![100.0],
            charged_attack: 150.0,
            plunge_attack: 185.8,
            elemental_skill: 200.0,
            elemental_burst: 300.0,
            scaling: ScalingAttribute::Atk,
            overrides: Vec::new(),
        }
    }
}

impl TalentMultipliers {
    /// Multiplier for an ability. `hit` selects a normal-attack hit and is
    /// ignored for every other ability. Returns `None` when the hit does
    /// not exist.
    pub fn multiplier(&self, ability: AbilityType, hit: usize) -> Option<f64> {
        match ability {
            AbilityType::NormalAttack => self.normal_attack.get(hit).copied(),
            AbilityType::ChargedAttack => Some(self.charged_attack),
            AbilityType::PlungeAttack => Some(self.plunge_attack),
            AbilityType::ElementalSkill => Some(self.elemental_skill),
            AbilityType::ElementalBurst => Some(self.elemental_burst),
        }
    }

    /// Scaling attribute for an ability, honoring per-ability overrides
    pub fn scaling_for(&self, ability: AbilityType) -> ScalingAttribute {
        self.overrides
            .iter()
            .find(|o| o.ability == ability)
            .map(|o| o.scaling)
            .unwrap_or(self.scaling)
    }
}

/// Bond of Life declaration for a character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondProfile {
    /// Max Bond value as % of max HP
    pub max_value: f64,
    pub rule: BondRule,
}

/// One character in the reference tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub element: Element,
    #[serde(default)]
    pub weapon: Option<WeaponType>,
    /// Missing base stats fall back to the archetype's
    #[serde(default)]
    pub base: Option<BaseStats>,
    /// Missing talents fall back to the default talent set
    #[serde(default)]
    pub talents: Option<TalentMultipliers>,
    /// Normal, charged and plunge attacks deal the character's element
    #[serde(default)]
    pub infusion: bool,
    /// Applies its element often and on a short cooldown
    #[serde(default)]
    pub reliable_applicator: bool,
    #[serde(default)]
    pub bond: Option<BondProfile>,
}

impl CharacterEntry {
    /// Generic archetype used for unknown characters
    pub fn archetype() -> Self {
        CharacterEntry {
            name: "Generic".to_string(),
            aliases: Vec::new(),
            element: Element::Physical,
            weapon: None,
            base: Some(BaseStats::default()),
            talents: Some(TalentMultipliers::default()),
            infusion: false,
            reliable_applicator: false,
            bond: None,
        }
    }
}

/// Level multiplier for transformative reactions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelMultiplier {
    pub level: u32,
    pub value: f64,
}

/// Transformative multiplier for a reaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReactionMultiplier {
    pub reaction: ReactionType,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct CharactersFile {
    #[serde(default = "CharacterEntry::archetype")]
    archetype: CharacterEntry,
    #[serde(default)]
    default_talents: TalentMultipliers,
    #[serde(default)]
    fallback_build: BTreeMap<StatKind, f64>,
    #[serde(default)]
    characters: Vec<CharacterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ArtifactSetsFile {
    #[serde(default)]
    bonuses: Vec<SetBonusDef>,
    #[serde(default)]
    recommendations: SetRecommendations,
}

#[derive(Debug, Clone, Deserialize)]
struct TeamBuffsFile {
    #[serde(default)]
    buffs: Vec<TeamBuffDef>,
    #[serde(default)]
    resonances: Vec<ResonanceDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReactionsFile {
    #[serde(default)]
    level_multipliers: Vec<LevelMultiplier>,
    #[serde(default)]
    transformative: Vec<ReactionMultiplier>,
    #[serde(default)]
    reactions: Vec<ReactionEntry>,
}

/// All static lookup data the engine consumes
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    characters: Vec<CharacterEntry>,
    /// Normalized name or alias → index into `characters`
    character_index: HashMap<String, usize>,
    archetype: CharacterEntry,
    default_talents: TalentMultipliers,
    fallback_build: BTreeMap<StatKind, f64>,
    set_bonuses: Vec<SetBonusDef>,
    set_recommendations: SetRecommendations,
    team_buffs: Vec<TeamBuffDef>,
    resonances: Vec<ResonanceDef>,
    reactions: Vec<ReactionEntry>,
    transformative: Vec<ReactionMultiplier>,
    /// Sorted by level
    level_multipliers: Vec<LevelMultiplier>,
}

impl ReferenceTables {
    /// Built-in tables, parsed once on first use
    pub fn builtin() -> &'static ReferenceTables {
        static TABLES: OnceLock<ReferenceTables> = OnceLock::new();
        TABLES.get_or_init(|| {
            Self::from_toml_strs(
                include_str!("../../config/characters.toml"),
                include_str!("../../config/artifact_sets.toml"),
                include_str!("../../config/team_buffs.toml"),
                include_str!("../../config/reactions.toml"),
            )
            .unwrap_or_else(|e| {
                error!(error = %e, "built-in reference tables failed to load, using empty tables");
                Self::empty()
            })
        })
    }

    /// Tables holding only the documented defaults
    pub fn empty() -> Self {
        ReferenceTables {
            characters: Vec::new(),
            character_index: HashMap::new(),
            archetype: CharacterEntry::archetype(),
            default_talents: TalentMultipliers::default(),
            fallback_build: BTreeMap::new(),
            set_bonuses: Vec::new(),
            set_recommendations: SetRecommendations::default(),
            team_buffs: Vec::new(),
            resonances: Vec::new(),
            reactions: Vec::new(),
            transformative: Vec::new(),
            level_multipliers: Vec::new(),
        }
    }

    /// Load the four table files from a directory
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let characters: CharactersFile = load_toml(&dir.join(CHARACTERS_FILE))?;
        let sets: ArtifactSetsFile = load_toml(&dir.join(ARTIFACT_SETS_FILE))?;
        let buffs: TeamBuffsFile = load_toml(&dir.join(TEAM_BUFFS_FILE))?;
        let reactions: ReactionsFile = load_toml(&dir.join(REACTIONS_FILE))?;
        Self::assemble(characters, sets, buffs, reactions)
    }

    /// Parse tables from TOML strings (characters, sets, team buffs, reactions)
    pub fn from_toml_strs(
        characters: &str,
        sets: &str,
        buffs: &str,
        reactions: &str,
    ) -> Result<Self, ConfigError> {
        Self::assemble(
            parse_toml(characters)?,
            parse_toml(sets)?,
            parse_toml(buffs)?,
            parse_toml(reactions)?,
        )
    }

    fn assemble(
        characters: CharactersFile,
        sets: ArtifactSetsFile,
        buffs: TeamBuffsFile,
        reactions: ReactionsFile,
    ) -> Result<Self, ConfigError> {
        let mut character_index = HashMap::new();
        for (idx, entry) in characters.characters.iter().enumerate() {
            let names = std::iter::once(&entry.name).chain(entry.aliases.iter());
            for name in names {
                if character_index.insert(normalize_name(name), idx).is_some() {
                    return Err(ConfigError::ValidationError(format!(
                        "duplicate character name or alias '{}'",
                        name
                    )));
                }
            }
        }

        let mut level_multipliers = reactions.level_multipliers;
        level_multipliers.sort_by_key(|m| m.level);

        let tables = ReferenceTables {
            characters: characters.characters,
            character_index,
            archetype: characters.archetype,
            default_talents: characters.default_talents,
            fallback_build: characters.fallback_build,
            set_bonuses: sets.bonuses,
            set_recommendations: sets.recommendations,
            team_buffs: buffs.buffs,
            resonances: buffs.resonances,
            reactions: reactions.reactions,
            transformative: reactions.transformative,
            level_multipliers,
        };
        tables.validate()?;

        debug!(
            characters = tables.characters.len(),
            set_bonuses = tables.set_bonuses.len(),
            team_buffs = tables.team_buffs.len(),
            reactions = tables.reactions.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }

    /// Check table invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let talent_sets = std::iter::once((&self.archetype.name, self.archetype.talents.as_ref()))
            .chain(std::iter::once((&self.archetype.name, Some(&self.default_talents))))
            .chain(self.characters.iter().map(|c| (&c.name, c.talents.as_ref())));
        for (name, talents) in talent_sets {
            if let Some(t) = talents {
                if t.normal_attack.is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "talents for '{}' have no normal attack hits",
                        name
                    )));
                }
            }
        }

        for bonus in &self.set_bonuses {
            if bonus.pieces != 2 && bonus.pieces != 4 {
                return Err(ConfigError::ValidationError(format!(
                    "set '{}' declares a {}-piece bonus, expected 2 or 4",
                    bonus.set, bonus.pieces
                )));
            }
        }

        for buff in self.team_buffs.iter() {
            if !(0.0..=100.0).contains(&buff.uptime) {
                return Err(ConfigError::ValidationError(format!(
                    "team buff from '{}' has uptime {} outside 0-100",
                    buff.source, buff.uptime
                )));
            }
        }

        if let Some(m) = self.level_multipliers.iter().find(|m| m.value <= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "level multiplier for level {} must be positive",
                m.level
            )));
        }

        if let Some(m) = self.transformative.iter().find(|m| m.value < 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "transformative multiplier for {} is negative",
                m.reaction
            )));
        }

        Ok(())
    }

    // === Characters ===

    pub fn character(&self, name: &str) -> Option<&CharacterEntry> {
        self.character_index
            .get(&normalize_name(name))
            .and_then(|&idx| self.characters.get(idx))
    }

    pub fn characters(&self) -> &[CharacterEntry] {
        &self.characters
    }

    pub fn archetype(&self) -> &CharacterEntry {
        &self.archetype
    }

    /// Character entry, or the archetype when the name is unknown
    pub fn character_or_archetype(&self, name: &str) -> &CharacterEntry {
        self.character(name).unwrap_or(&self.archetype)
    }

    pub fn element_of(&self, name: &str) -> Option<Element> {
        self.character(name).map(|c| c.element)
    }

    pub fn base_stats_for<'a>(&'a self, entry: &'a CharacterEntry) -> &'a BaseStats {
        entry
            .base
            .as_ref()
            .or(self.archetype.base.as_ref())
            .unwrap_or(&DEFAULT_BASE_STATS)
    }

    pub fn talents_for<'a>(&'a self, entry: &'a CharacterEntry) -> &'a TalentMultipliers {
        entry.talents.as_ref().unwrap_or(&self.default_talents)
    }

    /// Typical endgame gear used when a build carries no gear at all
    pub fn fallback_build(&self) -> &BTreeMap<StatKind, f64> {
        &self.fallback_build
    }

    // === Artifact sets ===

    /// All bonuses defined for a set name (case and whitespace insensitive)
    pub fn set_bonuses<'a>(&'a self, set_name: &str) -> impl Iterator<Item = &'a SetBonusDef> {
        let key = normalize_name(set_name);
        self.set_bonuses
            .iter()
            .filter(move |b| normalize_name(&b.set) == key)
    }

    pub fn has_set(&self, set_name: &str) -> bool {
        self.set_bonuses(set_name).next().is_some()
    }

    /// Canonical display name for a set, if known
    pub fn set_display_name(&self, set_name: &str) -> Option<&str> {
        self.set_bonuses(set_name).next().map(|b| b.set.as_str())
    }

    pub fn set_recommendations(&self) -> &SetRecommendations {
        &self.set_recommendations
    }

    // === Team ===

    /// Static buffs a character grants to teammates
    pub fn team_buffs_for<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a TeamBuffDef> {
        let key = self
            .character(name)
            .map(|c| normalize_name(&c.name))
            .unwrap_or_else(|| normalize_name(name));
        self.team_buffs
            .iter()
            .filter(move |b| normalize_name(&b.source) == key)
    }

    pub fn resonance(&self, element: Element) -> Option<&ResonanceDef> {
        self.resonances.iter().find(|r| r.element == element)
    }

    // === Reactions ===

    /// Reaction table in its fixed iteration order
    pub fn reactions(&self) -> &[ReactionEntry] {
        &self.reactions
    }

    /// Transformative multiplier for a reaction; 0 for reactions that deal
    /// no transformative damage
    pub fn transformative_multiplier(&self, reaction: ReactionType) -> f64 {
        self.transformative
            .iter()
            .find(|m| m.reaction == reaction)
            .map(|m| m.value)
            .unwrap_or(0.0)
    }

    /// Level multiplier for transformative damage. Levels missing from the
    /// table use the nearest tabulated level (the lower one on a tie).
    pub fn level_multiplier(&self, level: u32) -> f64 {
        self.level_multipliers
            .iter()
            .min_by_key(|m| m.level.abs_diff(level))
            .map(|m| m.value)
            .unwrap_or(0.0)
    }
}

static DEFAULT_BASE_STATS: BaseStats = BaseStats {
    base_atk: 800.0,
    base_hp: 12000.0,
    base_def: 700.0,
    ascension_stat: StatKind::AtkPercent,
    ascension_value: 24.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_load() {
        let tables = ReferenceTables::builtin();
        assert!(tables.validate().is_ok());
        assert!(!tables.characters().is_empty());
        assert!(!tables.reactions().is_empty());
    }

    #[test]
    fn test_character_lookup_normalizes() {
        let tables = ReferenceTables::builtin();
        let hu_tao = tables.character("  HU   tao ").unwrap();
        assert_eq!(hu_tao.element, Element::Pyro);
        let base = tables.base_stats_for(hu_tao);
        assert!((base.base_atk - 715.0).abs() < f64::EPSILON);
        assert_eq!(base.ascension_stat, StatKind::CritDmg);
    }

    #[test]
    fn test_alias_lookup() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.character("Tartaglia").unwrap().name, "Childe");
    }

    #[test]
    fn test_unknown_character_uses_archetype() {
        let tables = ReferenceTables::builtin();
        let entry = tables.character_or_archetype("Nobody In Particular");
        assert_eq!(entry.element, Element::Physical);
        let talents = tables.talents_for(entry);
        assert!((talents.elemental_skill - 200.0).abs() < f64::EPSILON);
        let base = tables.base_stats_for(entry);
        assert!((base.base_atk - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_talent_override() {
        let tables = ReferenceTables::builtin();
        let albedo = tables.character("albedo").unwrap();
        let talents = tables.talents_for(albedo);
        assert_eq!(talents.scaling_for(AbilityType::ElementalSkill), ScalingAttribute::Def);
        assert_eq!(talents.scaling_for(AbilityType::NormalAttack), ScalingAttribute::Atk);
    }

    #[test]
    fn test_level_multiplier_exact_and_nearest() {
        let tables = ReferenceTables::builtin();
        assert!((tables.level_multiplier(90) - 1446.85).abs() < 1e-9);
        assert!((tables.level_multiplier(80) - 1077.44).abs() < 1e-9);
        // Outside the table: nearest tabulated level
        assert!((tables.level_multiplier(95) - 1446.85).abs() < 1e-9);
        assert!((tables.level_multiplier(50) - 765.64).abs() < 1e-9);
    }

    #[test]
    fn test_transformative_multiplier_defaults_to_zero() {
        let tables = ReferenceTables::builtin();
        assert!((tables.transformative_multiplier(ReactionType::Overloaded) - 2.0).abs() < 1e-9);
        assert!((tables.transformative_multiplier(ReactionType::Crystallize)).abs() < 1e-9);
    }

    #[test]
    fn test_set_lookup_is_case_insensitive() {
        let tables = ReferenceTables::builtin();
        assert!(tables.has_set("GLADIATOR'S FINALE"));
        assert_eq!(tables.set_bonuses("gladiator's finale").count(), 2);
        assert!(!tables.has_set("Set That Does Not Exist"));
    }

    #[test]
    fn test_validation_rejects_empty_normal_chain() {
        let characters = r#"
[[characters]]
name = "Broken"
element = "pyro"
talents = { normal_attack = [], charged_attack = 1.0, plunge_attack = 1.0, elemental_skill = 1.0, elemental_burst = 1.0 }
"#;
        let result = ReferenceTables::from_toml_strs(characters, "", "", "");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_rejects_three_piece_bonus() {
        let sets = r#"
[[bonuses]]
set = "Odd Set"
pieces = 3
description = "three pieces"
"#;
        let result = ReferenceTables::from_toml_strs("", sets, "", "");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_empty_tables_fall_back() {
        let tables = ReferenceTables::empty();
        assert!(tables.character("hu tao").is_none());
        assert!((tables.level_multiplier(90)).abs() < f64::EPSILON);
        assert_eq!(tables.character_or_archetype("hu tao").name, "Generic");
    }
}
