use super::ProjectionSpec;

/// An aggregation request: a filter query followed by a pipeline of steps
/// the backend runs in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub query: String,
    pub pipeline: Vec<AggregateStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregateStep {
    /// `LOAD n path AS alias …`: pull document fields into the row
    Load(ProjectionSpec),

    /// `GROUPBY n @field … REDUCE …`
    GroupBy {
        fields: Vec<String>,
        reducers: Vec<Reducer>,
    },

    /// `APPLY expr AS alias`
    Apply { expr: String, alias: String },

    /// `FILTER expr`
    Filter(String),

    /// `SORTBY n @field ASC|DESC … [MAX max]`
    SortBy { keys: Vec<SortKey>, max: Option<u64> },

    /// `LIMIT offset num`
    Limit { offset: u64, num: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub ascending: bool,
}

/// `REDUCE func nargs args… AS alias`
#[derive(Debug, Clone, PartialEq)]
pub struct Reducer {
    pub func: ReducerFunc,
    pub args: Vec<String>,
    pub alias: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReducerFunc {
    Count,
    CountDistinct,
    Sum,
    Min,
    Max,
    Avg,
    ToList,
}

impl Aggregation {
    pub fn new(query: impl Into<String>) -> Aggregation {
        Aggregation {
            query: query.into(),
            pipeline: vec![],
        }
    }

    /// Aggregates over every document.
    pub fn all() -> Aggregation {
        Aggregation::new("*")
    }

    pub fn load(mut self, spec: ProjectionSpec) -> Self {
        self.pipeline.push(AggregateStep::Load(spec));
        self
    }

    pub fn group_by<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
        reducers: impl IntoIterator<Item = Reducer>,
    ) -> Self {
        self.pipeline.push(AggregateStep::GroupBy {
            fields: fields.into_iter().map(Into::into).collect(),
            reducers: reducers.into_iter().collect(),
        });
        self
    }

    pub fn apply(mut self, expr: impl Into<String>, alias: impl Into<String>) -> Self {
        self.pipeline.push(AggregateStep::Apply {
            expr: expr.into(),
            alias: alias.into(),
        });
        self
    }

    pub fn filter(mut self, expr: impl Into<String>) -> Self {
        self.pipeline.push(AggregateStep::Filter(expr.into()));
        self
    }

    pub fn sort_by(mut self, keys: impl IntoIterator<Item = SortKey>, max: Option<u64>) -> Self {
        self.pipeline.push(AggregateStep::SortBy {
            keys: keys.into_iter().collect(),
            max,
        });
        self
    }

    pub fn limit(mut self, offset: u64, num: u64) -> Self {
        self.pipeline.push(AggregateStep::Limit { offset, num });
        self
    }
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> SortKey {
        SortKey {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn desc(field: impl Into<String>) -> SortKey {
        SortKey {
            field: field.into(),
            ascending: false,
        }
    }
}

impl Reducer {
    pub fn count(alias: impl Into<String>) -> Reducer {
        Reducer::new(ReducerFunc::Count, None, alias)
    }

    pub fn count_distinct(field: impl Into<String>, alias: impl Into<String>) -> Reducer {
        Reducer::new(ReducerFunc::CountDistinct, Some(field.into()), alias)
    }

    pub fn sum(field: impl Into<String>, alias: impl Into<String>) -> Reducer {
        Reducer::new(ReducerFunc::Sum, Some(field.into()), alias)
    }

    pub fn min(field: impl Into<String>, alias: impl Into<String>) -> Reducer {
        Reducer::new(ReducerFunc::Min, Some(field.into()), alias)
    }

    pub fn max(field: impl Into<String>, alias: impl Into<String>) -> Reducer {
        Reducer::new(ReducerFunc::Max, Some(field.into()), alias)
    }

    pub fn avg(field: impl Into<String>, alias: impl Into<String>) -> Reducer {
        Reducer::new(ReducerFunc::Avg, Some(field.into()), alias)
    }

    pub fn to_list(field: impl Into<String>, alias: impl Into<String>) -> Reducer {
        Reducer::new(ReducerFunc::ToList, Some(field.into()), alias)
    }

    fn new(func: ReducerFunc, field: Option<String>, alias: impl Into<String>) -> Reducer {
        Reducer {
            func,
            args: field.into_iter().collect(),
            alias: alias.into(),
        }
    }
}

impl ReducerFunc {
    pub fn keyword(self) -> &'static str {
        match self {
            ReducerFunc::Count => "COUNT",
            ReducerFunc::CountDistinct => "COUNT_DISTINCT",
            ReducerFunc::Sum => "SUM",
            ReducerFunc::Min => "MIN",
            ReducerFunc::Max => "MAX",
            ReducerFunc::Avg => "AVG",
            ReducerFunc::ToList => "TOLIST",
        }
    }
}
