use super::Operation;

#[derive(Debug, Clone)]
pub struct HSet {
    pub key: String,

    /// Field name / value pairs, written in order
    pub fields: Vec<(String, String)>,
}

impl From<HSet> for Operation {
    fn from(value: HSet) -> Self {
        Self::HSet(value)
    }
}
