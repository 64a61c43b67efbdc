//! Serialized sentence records (one JSON object per line).

use msf_protocol::{FeatureMap, NodeId, Upos};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub id: NodeId,
    pub form: String,
    pub lemma: String,
    #[serde(default, with = "upos_column")]
    pub upos: Option<Upos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpos: Option<String>,
    #[serde(default, with = "feats_column")]
    pub feats: FeatureMap,
    pub head: NodeId,
    pub deprel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub sent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub tokens: Vec<TokenRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    #[serde(flatten)]
    pub token: TokenRecord,
    pub ms_feats: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub sent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub tokens: Vec<AnnotatedToken>,
}

mod upos_column {
    use msf_protocol::Upos;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(upos: &Option<Upos>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(upos.map_or("_", |tag| tag.as_str()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Upos>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("_") | Some("") => Ok(None),
            Some(tag) => tag
                .parse::<Upos>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("unknown UPOS tag {:?}", tag))),
        }
    }
}

mod feats_column {
    use msf_protocol::FeatureMap;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::feats::{format_features, parse_features};

    pub fn serialize<S: Serializer>(feats: &FeatureMap, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_features(feats))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FeatureMap, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(FeatureMap::new()),
            Some(text) => parse_features(&text).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_record_from_json() {
        let line = r#"{"id": 2, "form": "sleeps", "lemma": "sleep", "upos": "VERB",
            "feats": "Mood=Ind|Number=Sing|Person=3", "head": 0, "deprel": "root"}"#;
        let token: TokenRecord = serde_json::from_str(line).unwrap();

        assert_eq!(token.id, NodeId::word(2));
        assert_eq!(token.upos, Some(Upos::Verb));
        assert_eq!(token.feats["Person"], "3");
        assert!(token.head.is_root());
    }

    #[test]
    fn test_underscore_columns() {
        let line = r#"{"id": "1", "form": ".", "lemma": ".", "upos": "_", "feats": "_", "head": 2, "deprel": "punct"}"#;
        let token: TokenRecord = serde_json::from_str(line).unwrap();
        assert_eq!(token.upos, None);
        assert!(token.feats.is_empty());

        let bad = r#"{"id": 1, "form": "x", "lemma": "x", "upos": "NOPE", "head": 0, "deprel": "root"}"#;
        assert!(serde_json::from_str::<TokenRecord>(bad).is_err());
    }

    #[test]
    fn test_annotated_token_is_flat() {
        let token = AnnotatedToken {
            token: TokenRecord {
                id: NodeId::synthetic(2, 1),
                form: String::new(),
                lemma: String::new(),
                upos: None,
                xpos: None,
                feats: FeatureMap::new(),
                head: NodeId::word(2),
                deprel: "nsubj".to_string(),
                misc: None,
            },
            ms_feats: "Number=Sing".to_string(),
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["id"], "2.1");
        assert_eq!(json["ms_feats"], "Number=Sing");
        assert_eq!(json["feats"], "_");
    }
}
