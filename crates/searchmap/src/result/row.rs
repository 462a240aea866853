use crate::{Fields, Value};

use searchmap_core::driver::Properties;

/// Rows produced by an aggregation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    pub total: u64,
    pub rows: Vec<Row>,
}

/// One aggregation row: named values in reply order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub(crate) properties: Properties,
}

impl AggregationResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for AggregationResult {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl Row {
    pub fn new(properties: Properties) -> Row {
        Row { properties }
    }

    pub fn get(&self, alias: &str) -> Option<&Value> {
        self.properties.get(alias)
    }

    pub fn get_str(&self, alias: &str) -> Option<&str> {
        self.get(alias).and_then(Value::as_str)
    }

    /// The value of `alias` as an integer, parsing string values.
    pub fn get_i64(&self, alias: &str) -> Option<i64> {
        match self.get(alias)? {
            Value::String(s) => s.trim().parse().ok(),
            value => value.as_i64(),
        }
    }

    pub fn contains_key(&self, alias: &str) -> bool {
        self.properties.contains_key(alias)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn into_properties(self) -> Properties {
        self.properties
    }

    pub fn fields(&self) -> Fields<'_> {
        Fields::new(&self.properties)
    }
}
