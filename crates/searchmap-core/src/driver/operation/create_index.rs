use super::Operation;
use crate::schema::IndexDefinition;

#[derive(Debug, Clone)]
pub struct CreateIndex {
    pub definition: IndexDefinition,
}

impl From<CreateIndex> for Operation {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
