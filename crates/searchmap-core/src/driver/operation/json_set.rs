use super::Operation;

#[derive(Debug, Clone)]
pub struct JsonSet {
    pub key: String,

    /// The whole document, written at the root
    pub value: serde_json::Value,
}

impl From<JsonSet> for Operation {
    fn from(value: JsonSet) -> Self {
        Self::JsonSet(value)
    }
}
