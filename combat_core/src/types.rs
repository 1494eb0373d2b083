//! Core enumerations shared across the engine
//!
//! Elements, ability categories, scaling attributes and reactions are closed
//! sets. Free-form names coming from callers are parsed once at the boundary
//! (`from_name`) and everything downstream matches exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize an entity name for table lookups: trimmed, lowercase, single spaces
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Damage element. `Physical` is the non-elemental damage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Pyro,
    Hydro,
    Electro,
    Cryo,
    Anemo,
    Geo,
    Dendro,
    Physical,
}

impl Element {
    /// The seven canonical elements (everything except physical)
    pub const ELEMENTAL: [Element; 7] = [
        Element::Pyro,
        Element::Hydro,
        Element::Electro,
        Element::Cryo,
        Element::Anemo,
        Element::Geo,
        Element::Dendro,
    ];

    /// Elements that anemo can swirl and geo can crystallize
    pub const SWIRLABLE: [Element; 4] = [
        Element::Pyro,
        Element::Hydro,
        Element::Electro,
        Element::Cryo,
    ];

    /// Parse an element name ("Pyro", "fire", "physical", ...)
    pub fn from_name(name: &str) -> Option<Element> {
        match normalize_name(name).as_str() {
            "pyro" | "fire" => Some(Element::Pyro),
            "hydro" | "water" => Some(Element::Hydro),
            "electro" | "elec" | "electric" => Some(Element::Electro),
            "cryo" | "ice" => Some(Element::Cryo),
            "anemo" | "wind" => Some(Element::Anemo),
            "geo" | "rock" => Some(Element::Geo),
            "dendro" | "grass" => Some(Element::Dendro),
            "physical" | "phys" => Some(Element::Physical),
            _ => None,
        }
    }

    pub fn is_elemental(self) -> bool {
        self != Element::Physical
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Pyro => "pyro",
            Element::Hydro => "hydro",
            Element::Electro => "electro",
            Element::Cryo => "cryo",
            Element::Anemo => "anemo",
            Element::Geo => "geo",
            Element::Dendro => "dendro",
            Element::Physical => "physical",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ability category a talent multiplier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityType {
    NormalAttack,
    ChargedAttack,
    PlungeAttack,
    ElementalSkill,
    ElementalBurst,
}

impl AbilityType {
    /// Get all ability types in display order
    pub fn all() -> &'static [AbilityType] {
        &[
            AbilityType::NormalAttack,
            AbilityType::ChargedAttack,
            AbilityType::PlungeAttack,
            AbilityType::ElementalSkill,
            AbilityType::ElementalBurst,
        ]
    }

    /// Normal, charged and plunge attacks. These deal physical damage unless
    /// the character infuses them.
    pub fn is_attack(self) -> bool {
        matches!(
            self,
            AbilityType::NormalAttack | AbilityType::ChargedAttack | AbilityType::PlungeAttack
        )
    }

    pub fn from_name(name: &str) -> Option<AbilityType> {
        match normalize_name(name).replace(['-', ' '], "_").as_str() {
            "normal_attack" | "normal" | "na" => Some(AbilityType::NormalAttack),
            "charged_attack" | "charged" | "ca" => Some(AbilityType::ChargedAttack),
            "plunge_attack" | "plunging_attack" | "plunge" => Some(AbilityType::PlungeAttack),
            "elemental_skill" | "skill" | "e" => Some(AbilityType::ElementalSkill),
            "elemental_burst" | "burst" | "q" => Some(AbilityType::ElementalBurst),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AbilityType::NormalAttack => "normal_attack",
            AbilityType::ChargedAttack => "charged_attack",
            AbilityType::PlungeAttack => "plunge_attack",
            AbilityType::ElementalSkill => "elemental_skill",
            AbilityType::ElementalBurst => "elemental_burst",
        }
    }
}

impl fmt::Display for AbilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stat a talent multiplier is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingAttribute {
    #[default]
    Atk,
    Hp,
    Def,
    Em,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Sword,
    Claymore,
    Polearm,
    Bow,
    Catalyst,
}

impl WeaponType {
    pub fn from_name(name: &str) -> Option<WeaponType> {
        match normalize_name(name).as_str() {
            "sword" | "sword_one_hand" => Some(WeaponType::Sword),
            "claymore" | "sword_two_hand" => Some(WeaponType::Claymore),
            "polearm" | "pole" => Some(WeaponType::Polearm),
            "bow" => Some(WeaponType::Bow),
            "catalyst" => Some(WeaponType::Catalyst),
            _ => None,
        }
    }
}

/// Whether a reaction multiplies the triggering hit or deals its own damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Amplifying,
    Transformative,
}

/// Elemental reactions known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
    Vaporize,
    Melt,
    Overloaded,
    ElectroCharged,
    Superconduct,
    Frozen,
    Shatter,
    Swirl,
    Crystallize,
    Bloom,
    Burning,
    Quicken,
    Spread,
    Hyperbloom,
    Burgeon,
}

impl ReactionType {
    pub fn kind(self) -> ReactionKind {
        match self {
            ReactionType::Vaporize | ReactionType::Melt => ReactionKind::Amplifying,
            _ => ReactionKind::Transformative,
        }
    }

    pub fn is_amplifying(self) -> bool {
        self.kind() == ReactionKind::Amplifying
    }

    /// Parse a caller-supplied reaction name. Separators and case are ignored
    /// so "Electro-Charged", "electro_charged" and "electrocharged" agree.
    pub fn from_name(name: &str) -> Option<ReactionType> {
        let key: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "vaporize" | "vaporise" => Some(ReactionType::Vaporize),
            "melt" => Some(ReactionType::Melt),
            "overloaded" | "overload" => Some(ReactionType::Overloaded),
            "electrocharged" => Some(ReactionType::ElectroCharged),
            "superconduct" => Some(ReactionType::Superconduct),
            "frozen" | "freeze" => Some(ReactionType::Frozen),
            "shatter" => Some(ReactionType::Shatter),
            "swirl" => Some(ReactionType::Swirl),
            "crystallize" | "crystallise" => Some(ReactionType::Crystallize),
            "bloom" => Some(ReactionType::Bloom),
            "burning" | "burn" => Some(ReactionType::Burning),
            "quicken" => Some(ReactionType::Quicken),
            "spread" => Some(ReactionType::Spread),
            "hyperbloom" => Some(ReactionType::Hyperbloom),
            "burgeon" => Some(ReactionType::Burgeon),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReactionType::Vaporize => "vaporize",
            ReactionType::Melt => "melt",
            ReactionType::Overloaded => "overloaded",
            ReactionType::ElectroCharged => "electro_charged",
            ReactionType::Superconduct => "superconduct",
            ReactionType::Frozen => "frozen",
            ReactionType::Shatter => "shatter",
            ReactionType::Swirl => "swirl",
            ReactionType::Crystallize => "crystallize",
            ReactionType::Bloom => "bloom",
            ReactionType::Burning => "burning",
            ReactionType::Quicken => "quicken",
            ReactionType::Spread => "spread",
            ReactionType::Hyperbloom => "hyperbloom",
            ReactionType::Burgeon => "burgeon",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unknown entity that was replaced by a default instead of failing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Fallback {
    /// Character missing from the reference tables; archetype stats were used
    UnknownCharacter(String),
    /// Set name missing from the set table; contributes no bonus
    UnknownSet(String),
    /// Stat name not covered by the name-mapping table; ignored
    UnknownStat(String),
    /// Reaction name that does not parse; treated as no reaction
    UnknownReaction(String),
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::UnknownCharacter(name) => {
                write!(f, "unknown character '{}', using generic archetype", name)
            }
            Fallback::UnknownSet(name) => write!(f, "unknown artifact set '{}', no bonus", name),
            Fallback::UnknownStat(name) => write!(f, "unknown stat '{}', ignored", name),
            Fallback::UnknownReaction(name) => {
                write!(f, "unknown reaction '{}', no reaction applied", name)
            }
        }
    }
}
