use super::operation::{Aggregate, CreateIndex, DropIndex, HSet, JsonSet, Operation, Search};
use crate::{
    query::{AggregateStep, SearchQuery},
    schema::{FieldType, IndexDefinition},
};

use std::fmt;

/// An operation rendered as a backend command: a command name followed by
/// its arguments, exactly as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub args: Vec<String>,
}

impl Command {
    fn new(name: &'static str) -> Command {
        Command { name, args: vec![] }
    }

    fn arg(&mut self, arg: impl Into<String>) -> &mut Command {
        self.args.push(arg.into());
        self
    }

    fn args<I, S>(&mut self, args: I) -> &mut Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Operation {
    pub fn command(&self) -> Command {
        match self {
            Operation::Aggregate(op) => op.command(),
            Operation::CreateIndex(op) => op.command(),
            Operation::DropIndex(op) => op.command(),
            Operation::HSet(op) => op.command(),
            Operation::JsonSet(op) => op.command(),
            Operation::Search(op) => op.command(),
        }
    }
}

impl CreateIndex {
    /// `FT.CREATE name ON JSON [PREFIX n p…] [FILTER expr] SCHEMA …`
    pub fn command(&self) -> Command {
        let definition = &self.definition;
        let mut cmd = Command::new("FT.CREATE");

        cmd.arg(&definition.name)
            .arg("ON")
            .arg(definition.source.keyword());

        if !definition.prefixes.is_empty() {
            cmd.arg("PREFIX")
                .arg(definition.prefixes.len().to_string())
                .args(&definition.prefixes);
        }

        if let Some(filter) = &definition.filter {
            cmd.arg("FILTER").arg(filter);
        }

        cmd.arg("SCHEMA");

        for field in &definition.fields {
            schema_field(&mut cmd, definition, field);
        }

        cmd
    }
}

fn schema_field(cmd: &mut Command, definition: &IndexDefinition, field: &crate::FieldMapping) {
    cmd.arg(definition.source_identifier(field))
        .arg("AS")
        .arg(&field.alias)
        .arg(field.ty.keyword());

    match field.ty {
        FieldType::Text {
            weight: Some(weight),
        } => {
            cmd.arg("WEIGHT").arg(weight.to_string());
        }
        FieldType::Tag {
            separator: Some(separator),
        } => {
            cmd.arg("SEPARATOR").arg(separator.to_string());
        }
        _ => {}
    }

    if field.sortable {
        cmd.arg("SORTABLE");
    }
}

impl DropIndex {
    /// `FT.DROPINDEX name`. Documents are left in place.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new("FT.DROPINDEX");
        cmd.arg(&self.index);
        cmd
    }
}

impl Search {
    pub fn command(&self) -> Command {
        let mut cmd = Command::new("FT.SEARCH");
        cmd.arg(&self.index).arg(&self.query.query);
        search_options(&mut cmd, &self.query);
        cmd
    }
}

fn search_options(cmd: &mut Command, query: &SearchQuery) {
    if query.no_content {
        cmd.arg("NOCONTENT");
    }

    if query.verbatim {
        cmd.arg("VERBATIM");
    }

    if query.with_scores {
        cmd.arg("WITHSCORES");
    }

    if query.with_payloads {
        cmd.arg("WITHPAYLOADS");
    }

    if let Some(spec) = &query.return_fields {
        cmd.arg("RETURN").args(spec.clause_args());
    }

    if let Some(sort_by) = &query.sort_by {
        cmd.arg("SORTBY")
            .arg(&sort_by.field)
            .arg(if sort_by.ascending { "ASC" } else { "DESC" });
    }

    if let Some((offset, num)) = query.limit {
        cmd.arg("LIMIT").arg(offset.to_string()).arg(num.to_string());
    }

    if let Some(dialect) = query.dialect {
        cmd.arg("DIALECT").arg(dialect.to_string());
    }
}

impl Aggregate {
    pub fn command(&self) -> Command {
        let mut cmd = Command::new("FT.AGGREGATE");
        cmd.arg(&self.index).arg(&self.aggregation.query);

        for step in &self.aggregation.pipeline {
            match step {
                AggregateStep::Load(spec) => {
                    cmd.arg("LOAD").args(spec.clause_args());
                }
                AggregateStep::GroupBy { fields, reducers } => {
                    cmd.arg("GROUPBY").arg(fields.len().to_string()).args(fields);

                    for reducer in reducers {
                        cmd.arg("REDUCE")
                            .arg(reducer.func.keyword())
                            .arg(reducer.args.len().to_string())
                            .args(&reducer.args)
                            .arg("AS")
                            .arg(&reducer.alias);
                    }
                }
                AggregateStep::Apply { expr, alias } => {
                    cmd.arg("APPLY").arg(expr).arg("AS").arg(alias);
                }
                AggregateStep::Filter(expr) => {
                    cmd.arg("FILTER").arg(expr);
                }
                AggregateStep::SortBy { keys, max } => {
                    cmd.arg("SORTBY").arg((keys.len() * 2).to_string());
                    for key in keys {
                        cmd.arg(&key.field)
                            .arg(if key.ascending { "ASC" } else { "DESC" });
                    }
                    if let Some(max) = max {
                        cmd.arg("MAX").arg(max.to_string());
                    }
                }
                AggregateStep::Limit { offset, num } => {
                    cmd.arg("LIMIT").arg(offset.to_string()).arg(num.to_string());
                }
            }
        }

        cmd
    }
}

impl JsonSet {
    /// `JSON.SET key $ json`
    pub fn command(&self) -> Command {
        let mut cmd = Command::new("JSON.SET");
        cmd.arg(&self.key).arg("$").arg(self.value.to_string());
        cmd
    }
}

impl HSet {
    pub fn command(&self) -> Command {
        let mut cmd = Command::new("HSET");
        cmd.arg(&self.key);
        for (field, value) in &self.fields {
            cmd.arg(field).arg(value);
        }
        cmd
    }
}

impl fmt::Display for Command {
    /// Renders the command the way `redis-cli` echoes it, quoting arguments
    /// that contain whitespace or quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;

        for arg in &self.args {
            if arg.is_empty() || arg.contains(|ch: char| ch.is_whitespace() || ch == '\'') {
                write!(f, " '{}'", arg.replace('\'', "\\'"))?;
            } else {
                write!(f, " {arg}")?;
            }
        }

        Ok(())
    }
}
