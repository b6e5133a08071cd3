//! TDK `gts` response parsing

use crate::error::LookupError;
use serde::Deserialize;
use serde_json::Value;

/// One meaning of a word, with its usage examples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    pub meaning: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(rename = "anlamlarListe", default)]
    senses: Option<Vec<RawSense>>,
}

#[derive(Debug, Deserialize)]
struct RawSense {
    #[serde(default)]
    anlam: Option<String>,
    #[serde(rename = "orneklerListe", default)]
    examples: Option<Vec<RawExample>>,
}

#[derive(Debug, Deserialize)]
struct RawExample {
    #[serde(default)]
    ornek: Option<String>,
}

/// Parse a service body.
///
/// Returns `Ok(None)` when the service answered but has no meaning for the
/// word. Proxy bodies that wrap the real answer in a `contents` string are
/// unwrapped first.
pub fn parse(body: &str) -> Result<Option<Vec<Sense>>, LookupError> {
    let mut value: Value = serde_json::from_str(body)?;
    if let Some(inner) = value.get("contents").and_then(Value::as_str) {
        value = serde_json::from_str(inner)?;
    }

    match value {
        Value::Array(entries) => {
            let Some(first) = entries.into_iter().next() else {
                return Ok(None);
            };
            let entry: Entry = serde_json::from_value(first)?;
            let senses: Vec<Sense> = entry
                .senses
                .unwrap_or_default()
                .into_iter()
                .filter_map(|raw| {
                    let meaning = raw.anlam?.trim().to_string();
                    let examples = raw
                        .examples
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|e| e.ornek)
                        .filter(|e| !e.trim().is_empty())
                        .collect();
                    Some(Sense { meaning, examples })
                })
                .filter(|sense| !sense.meaning.is_empty())
                .collect();
            Ok((!senses.is_empty()).then_some(senses))
        }
        // {"error": "Sonuç bulunamadı"}
        Value::Object(map) if map.contains_key("error") => Ok(None),
        _ => Err(LookupError::Service),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KALEM: &str = r#"[{"madde":"kalem","anlamlarListe":[
        {"anlam":"Yazı yazmaya yarayan araç",
         "orneklerListe":[{"ornek":"Kalemi elinden bırakmadı."}]},
        {"anlam":"Bir hesapta ayrı tutulan bölüm"}
    ]}]"#;

    #[test]
    fn test_parse_senses_and_examples() {
        let senses = parse(KALEM).unwrap().unwrap();
        assert_eq!(senses.len(), 2);
        assert_eq!(senses[0].meaning, "Yazı yazmaya yarayan araç");
        assert_eq!(senses[0].examples, vec!["Kalemi elinden bırakmadı."]);
        assert!(senses[1].examples.is_empty());
    }

    #[test]
    fn test_parse_proxy_wrapper() {
        let wrapped = serde_json::json!({ "contents": KALEM, "status": {"http_code": 200} });
        let senses = parse(&wrapped.to_string()).unwrap().unwrap();
        assert_eq!(senses[1].meaning, "Bir hesapta ayrı tutulan bölüm");
    }

    #[test]
    fn test_parse_not_found() {
        assert_eq!(parse(r#"{"error":"Sonuç bulunamadı"}"#).unwrap(), None);
        assert_eq!(parse("[]").unwrap(), None);
        assert_eq!(parse(r#"[{"madde":"kalem"}]"#).unwrap(), None);
        assert_eq!(parse(r#"[{"anlamlarListe":[]}]"#).unwrap(), None);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse("<html>"), Err(LookupError::Json(_))));
        assert!(matches!(parse(r#""ok""#), Err(LookupError::Service)));
    }
}
