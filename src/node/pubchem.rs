//! Choosing the best PubChem compound when several share a clique

use crate::curie::Identifier;
use std::collections::HashMap;

pub const PUBCHEM_COMPOUND: &str = "PUBCHEM.COMPOUND";

/// Pick the PubChem compound that should lead the clique.
///
/// 1. The candidate whose label matches (case-insensitively) the most
///    non-PubChem labels in the clique.
/// 2. Else the shortest candidate label not starting with `CID`.
/// 3. Else the smallest candidate identifier.
///
/// Every tie goes to the smallest identifier, so the choice does not depend
/// on candidate order.
pub fn pick_best(
    candidates: &[Identifier],
    labels: &HashMap<Identifier, String>,
) -> Option<Identifier> {
    let other_labels: Vec<String> = labels
        .iter()
        .filter(|(id, _)| !id.prefix().eq_ignore_ascii_case(PUBCHEM_COMPOUND))
        .map(|(_, l)| l.to_lowercase())
        .collect();

    let mut sorted: Vec<&Identifier> = candidates.iter().collect();
    sorted.sort();
    sorted.dedup();

    let mut best_match: Option<(&Identifier, usize)> = None;
    for id in &sorted {
        let Some(label) = labels.get(*id) else { continue };
        let label = label.to_lowercase();
        let count = other_labels.iter().filter(|l| **l == label).count();
        if count > 0 && best_match.map_or(true, |(_, c)| count > c) {
            best_match = Some((*id, count));
        }
    }
    if let Some((id, _)) = best_match {
        return Some(id.clone());
    }

    let shortest = sorted
        .iter()
        .filter_map(|id| labels.get(*id).map(|l| (*id, l)))
        .filter(|(_, l)| !l.trim().is_empty() && !l.starts_with("CID"))
        .min_by(|(ia, la), (ib, lb)| {
            la.chars()
                .count()
                .cmp(&lb.chars().count())
                .then_with(|| ia.cmp(ib))
        });
    if let Some((id, _)) = shortest {
        return Some(id.clone());
    }

    sorted.first().map(|id| (*id).clone())
}

/// Move `best` to the front, keeping the others in order
pub fn promote(ids: &mut Vec<Identifier>, best: &Identifier) {
    if let Some(pos) = ids.iter().position(|id| id == best) {
        let chosen = ids.remove(pos);
        ids.insert(0, chosen);
    }
}
