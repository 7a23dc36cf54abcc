//! Serialized compendium and synonym records

use serde::{Deserialize, Serialize};

/// One identifier line inside a compendium record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordIdentifier {
    #[serde(rename = "i")]
    pub identifier: String,
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Shortest first
    #[serde(rename = "d", default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
    /// Numeric taxon order
    #[serde(rename = "t", default, skip_serializing_if = "Vec::is_empty")]
    pub taxa: Vec<String>,
}

/// One clique in the compendium file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompendiumRecord {
    #[serde(rename = "type")]
    pub biolink_type: String,
    pub ic: Option<f64>,
    /// Empty when no usable label exists
    pub preferred_name: String,
    pub taxa: Vec<String>,
    pub identifiers: Vec<RecordIdentifier>,
}

/// One clique in the synonym file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymRecord {
    pub curie: String,
    /// Shortest first
    pub names: Vec<String>,
    /// Type ancestry without the `biolink:` prefix
    pub types: Vec<String>,
    pub preferred_name: String,
    pub shortest_name_length: usize,
    pub clique_identifier_count: usize,
    pub taxa: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compendium_record_shape() {
        let rec = CompendiumRecord {
            biolink_type: "biolink:SmallMolecule".into(),
            ic: None,
            preferred_name: "Water".into(),
            taxa: vec![],
            identifiers: vec![
                RecordIdentifier {
                    identifier: "CHEBI:15377".into(),
                    label: Some("water".into()),
                    descriptions: vec!["A colorless liquid".into()],
                    taxa: vec![],
                },
                RecordIdentifier {
                    identifier: "MESH:D014867".into(),
                    label: None,
                    descriptions: vec![],
                    taxa: vec![],
                },
            ],
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "biolink:SmallMolecule",
                "ic": null,
                "preferred_name": "Water",
                "taxa": [],
                "identifiers": [
                    {"i": "CHEBI:15377", "l": "water", "d": ["A colorless liquid"]},
                    {"i": "MESH:D014867"}
                ]
            })
        );
    }

    #[test]
    fn identifier_fields_default_when_absent() {
        let rec: RecordIdentifier = serde_json::from_str(r#"{"i": "HP:1"}"#).unwrap();
        assert_eq!(rec.label, None);
        assert!(rec.descriptions.is_empty());
        assert!(rec.taxa.is_empty());
    }
}
