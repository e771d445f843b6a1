//! Serialized catalog shape.
//!
//! These DTOs mirror the JSON document one-to-one. Boards stay as raw row
//! strings here so that validation can report which entry is malformed.

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CatalogDto {
    #[serde(default)]
    pub(crate) openings: Vec<OpeningDto>,
    #[serde(default)]
    pub(crate) drills: Vec<DrillDto>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OpeningDto {
    pub(crate) name: String,
    pub(crate) steps: Vec<StepDto>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StepDto {
    pub(crate) board: Vec<String>,
    #[serde(rename = "move")]
    pub(crate) move_label: String,
    #[serde(default)]
    pub(crate) position: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DrillDto {
    pub(crate) board: Vec<String>,
    pub(crate) question: String,
    pub(crate) options: Vec<String>,
    pub(crate) answer: String,
    #[serde(default)]
    pub(crate) opening: Option<String>,
}
