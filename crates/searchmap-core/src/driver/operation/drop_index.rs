use super::Operation;

#[derive(Debug, Clone)]
pub struct DropIndex {
    pub index: String,
}

impl From<DropIndex> for Operation {
    fn from(value: DropIndex) -> Self {
        Self::DropIndex(value)
    }
}
