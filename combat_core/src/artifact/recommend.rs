//! Set recommendations per element

use crate::config::ReferenceTables;
use crate::types::{normalize_name, Element};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MAX_RECOMMENDATIONS: usize = 6;

/// Recommendation lists as stored in the set table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetRecommendations {
    #[serde(default)]
    pub universal: Vec<String>,
    #[serde(default)]
    pub by_element: BTreeMap<Element, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusSummary {
    pub pieces: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecommendation {
    pub set_name: String,
    pub priority: Priority,
    pub bonuses: Vec<BonusSummary>,
}

/// Element-specific sets first, then universal ones, without duplicates
pub fn recommend_sets(element: Element, tables: &ReferenceTables) -> Vec<SetRecommendation> {
    let lists = tables.set_recommendations();
    let element_sets: &[String] = lists
        .by_element
        .get(&element)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut seen: Vec<String> = Vec::new();
    let mut recommendations = Vec::new();
    for name in element_sets.iter().chain(lists.universal.iter()) {
        let key = normalize_name(name);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        if recommendations.len() == MAX_RECOMMENDATIONS {
            break;
        }
        let Some(display) = tables.set_display_name(name) else {
            continue;
        };
        let mut bonuses: Vec<BonusSummary> = tables
            .set_bonuses(name)
            .map(|b| BonusSummary {
                pieces: b.pieces,
                description: b.description.clone(),
            })
            .collect();
        bonuses.sort_by_key(|b| b.pieces);

        let priority = if element_sets.iter().any(|s| normalize_name(s) == normalize_name(name)) {
            Priority::High
        } else {
            Priority::Medium
        };
        recommendations.push(SetRecommendation {
            set_name: display.to_string(),
            priority,
            bonuses,
        });
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_sets_first_and_deduplicated() {
        let recs = recommend_sets(Element::Pyro, ReferenceTables::builtin());
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert_eq!(recs[0].set_name, "Crimson Witch of Flames");
        assert_eq!(recs[0].priority, Priority::High);
        let shimenawa = recs
            .iter()
            .filter(|r| r.set_name == "Shimenawa's Reminiscence")
            .count();
        assert_eq!(shimenawa, 1);
        assert_eq!(recs[3].priority, Priority::Medium);
    }

    #[test]
    fn test_bonuses_listed_in_piece_order() {
        let recs = recommend_sets(Element::Anemo, ReferenceTables::builtin());
        let vv = &recs[0];
        assert_eq!(vv.set_name, "Viridescent Venerer");
        assert_eq!(vv.bonuses.len(), 2);
        assert_eq!(vv.bonuses[0].pieces, 2);
        assert_eq!(vv.bonuses[1].pieces, 4);
    }

    #[test]
    fn test_empty_tables_recommend_nothing() {
        assert!(recommend_sets(Element::Hydro, &ReferenceTables::empty()).is_empty());
    }
}
