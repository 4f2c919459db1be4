//! The single testcase entry and its editable fields.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error};
use serde::{Deserialize, Serialize};

use crate::error::ManagerError;

/// Default time limit of a new testcase, in milliseconds.
pub const DEFAULT_TIME_LIMIT: i64 = 2000;
/// Default memory limit of a new testcase, in KiB.
pub const DEFAULT_MEMORY_LIMIT: i64 = 1_048_576;
/// Default score of a new testcase.
pub const DEFAULT_SCORE: i64 = 0;
/// Default subtask id of a new testcase.
pub const DEFAULT_SUBTASK_ID: i64 = 0;

/// A single testcase: a scanned `.in`/`.ans` pair plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestcaseEntry {
    /// The file name of the input file, extension included. Unique within a collection.
    pub name: String,
    /// The time limit for this testcase, in milliseconds.
    pub time_limit: i64,
    /// The memory limit for this testcase, in KiB.
    pub memory_limit: i64,
    /// The score assigned to this testcase.
    pub score: i64,
    /// The id of the subtask this testcase belongs to.
    pub subtask_id: i64,
}

impl TestcaseEntry {
    /// Make a new entry with the default metadata.
    pub fn new<S: Into<String>>(name: S) -> TestcaseEntry {
        TestcaseEntry {
            name: name.into(),
            time_limit: DEFAULT_TIME_LIMIT,
            memory_limit: DEFAULT_MEMORY_LIMIT,
            score: DEFAULT_SCORE,
            subtask_id: DEFAULT_SUBTASK_ID,
        }
    }

    /// Get the value of an editable field.
    pub fn get(&self, field: Field) -> i64 {
        match field {
            Field::TimeLimit => self.time_limit,
            Field::MemoryLimit => self.memory_limit,
            Field::Score => self.score,
            Field::SubtaskId => self.subtask_id,
        }
    }

    /// Set the value of an editable field.
    pub fn set(&mut self, field: Field, value: i64) {
        match field {
            Field::TimeLimit => self.time_limit = value,
            Field::MemoryLimit => self.memory_limit = value,
            Field::Score => self.score = value,
            Field::SubtaskId => self.subtask_id = value,
        }
    }
}

/// The editable numeric fields of a testcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Time limit, in milliseconds.
    TimeLimit,
    /// Memory limit, in KiB.
    MemoryLimit,
    /// Score of the testcase.
    Score,
    /// Id of the subtask the testcase belongs to.
    SubtaskId,
}

/// All the editable fields, in the order they appear in the exported file.
pub const FIELDS: [Field; 4] = [
    Field::TimeLimit,
    Field::MemoryLimit,
    Field::Score,
    Field::SubtaskId,
];

impl Field {
    /// The key of this field in the exchange file format.
    pub fn key(&self) -> &'static str {
        match self {
            Field::TimeLimit => "timeLimit",
            Field::MemoryLimit => "memoryLimit",
            Field::Score => "score",
            Field::SubtaskId => "subtaskId",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timeLimit" => Ok(Field::TimeLimit),
            "memoryLimit" => Ok(Field::MemoryLimit),
            "score" => Ok(Field::Score),
            "subtaskId" => Ok(Field::SubtaskId),
            _ => bail!("Unknown field: {}", s),
        }
    }
}

/// A validated partial update of the fields of one or more testcases.
///
/// Fields left to `None` are not touched when the patch is applied. A patch is built
/// from the raw strings the user entered, and building it fails on the first value
/// that does not parse as an integer: nothing gets applied in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    values: [Option<i64>; 4],
}

impl FieldPatch {
    /// Parse a patch from raw user-entered `(field, value)` strings.
    ///
    /// With `allow_blank` an empty value means "leave this field as it is"; without it
    /// every value must be a valid integer. The whole parse fails on the first invalid
    /// value, naming the offending field.
    pub fn parse<'a, I>(values: I, allow_blank: bool) -> Result<FieldPatch, ManagerError>
    where
        I: IntoIterator<Item = (Field, &'a str)>,
    {
        let mut patch = FieldPatch::default();
        for (field, raw) in values {
            let raw = raw.trim();
            if raw.is_empty() && allow_blank {
                continue;
            }
            let value = raw.parse::<i64>().map_err(|_| ManagerError::InvalidValue {
                field,
                value: raw.to_string(),
            })?;
            patch.set(field, value);
        }
        Ok(patch)
    }

    /// Set the new value of a field.
    pub fn set(&mut self, field: Field, value: i64) -> &mut FieldPatch {
        self.values[field as usize] = Some(value);
        self
    }

    /// The new value of a field, if the patch touches it.
    pub fn get(&self, field: Field) -> Option<i64> {
        self.values[field as usize]
    }

    /// Whether the patch does not touch any field.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Apply the patch to an entry, overwriting only the fields the patch touches.
    pub fn apply_to(&self, entry: &mut TestcaseEntry) {
        for field in FIELDS {
            if let Some(value) = self.get(field) {
                entry.set(field, value);
            }
        }
    }
}
