//! Wire types of the classification service.
//!
//! Decoding is tolerant: unknown fields are ignored, `row_id` may arrive as a
//! number or a numeric string, and the optional download handle is accepted as
//! `file_id` or `fileId`.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub total_rows: u64,
    pub benign_count: u64,
    pub attack_count: u64,
    pub anomaly_count: u64,
    #[serde(default)]
    pub results: Vec<WirePrediction>,
    #[serde(default, alias = "fileId", skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePrediction {
    #[serde(deserialize_with = "deserialize_row_id")]
    pub row_id: u64,
    pub prediction: String,
    pub confidence: f64,
    #[serde(default)]
    pub anomaly_flag: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub loaded_models: Vec<String>,
}

/// One entry of `GET /models`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `GET /models` answers with either plain names or descriptor objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ModelListEntry {
    Name(String),
    Descriptor(ModelDescriptor),
}

impl From<ModelListEntry> for ModelDescriptor {
    fn from(entry: ModelListEntry) -> Self {
        match entry {
            ModelListEntry::Name(name) => ModelDescriptor {
                name,
                filename: None,
                description: None,
            },
            ModelListEntry::Descriptor(descriptor) => descriptor,
        }
    }
}

/// FastAPI-style error body: `{"detail": "..."}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Only string details are shown to the analyst
    pub fn detail_message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowIdRepr {
    Number(u64),
    Text(String),
}

fn deserialize_row_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RowIdRepr::deserialize(deserializer)? {
        RowIdRepr::Number(n) => Ok(n),
        RowIdRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid row_id: {:?}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_number_or_string() {
        let json = r#"{
            "total_rows": 2, "benign_count": 1, "attack_count": 1, "anomaly_count": 0,
            "results": [
                {"row_id": 0, "prediction": "BENIGN", "confidence": 0.97, "anomaly_flag": false},
                {"row_id": "1", "prediction": "DDoS", "confidence": 0.8, "anomaly_flag": false, "label_index": 2}
            ]
        }"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results[0].row_id, 0);
        assert_eq!(response.results[1].row_id, 1);
        assert!(response.file_id.is_none());
    }

    #[test]
    fn test_negative_row_id_rejected() {
        let json = r#"{"row_id": "-3", "prediction": "Bot", "confidence": 0.5}"#;
        assert!(serde_json::from_str::<WirePrediction>(json).is_err());
    }

    #[test]
    fn test_file_id_alias() {
        let json = r#"{"total_rows": 0, "benign_count": 0, "attack_count": 0,
                       "anomaly_count": 0, "results": [], "fileId": "abc"}"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.file_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_error_detail_only_strings() {
        assert_eq!(
            ErrorBody::detail_message(r#"{"detail": "File ID not found"}"#).as_deref(),
            Some("File ID not found")
        );
        assert_eq!(ErrorBody::detail_message(r#"{"detail": [{"loc": ["body"]}]}"#), None);
        assert_eq!(ErrorBody::detail_message("Internal Server Error"), None);
    }

    #[test]
    fn test_model_list_shapes() {
        let names: Vec<ModelListEntry> = serde_json::from_str(r#"["XGBoost"]"#).unwrap();
        let objects: Vec<ModelListEntry> = serde_json::from_str(
            r#"[{"name": "Random Forest", "filename": "random_forest_model.pkl"}]"#,
        )
        .unwrap();

        let names: Vec<ModelDescriptor> = names.into_iter().map(Into::into).collect();
        let objects: Vec<ModelDescriptor> = objects.into_iter().map(Into::into).collect();
        assert_eq!(names[0].name, "XGBoost");
        assert_eq!(objects[0].name, "Random Forest");
        assert_eq!(objects[0].filename.as_deref(), Some("random_forest_model.pkl"));
    }
}
