use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// One row as returned by the spreadsheet store. Every column comes back
/// string-typed regardless of what was originally submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetRecord {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    #[serde(rename = "StudentName", default)]
    pub student_name: String,
    #[serde(rename = "Step", default)]
    pub step: String,
    #[serde(rename = "Score", default)]
    pub score: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
}

/// A single submission as shown on the dashboard.
///
/// `step` and `score` are coerced from the store's string columns; values
/// that do not parse become `null` rather than failing the whole read.
/// `data` is always empty because the store does not retain the detailed
/// submission payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionEntry {
    pub step: Option<i64>,
    pub score: Option<i64>,
    pub timestamp: String,
    pub data: Map<String, Value>,
}

/// Per-student view rebuilt from the flat record list on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAggregate {
    pub student_id: String,
    pub student_name: String,
    pub submissions: Vec<SubmissionEntry>,
}

/// Group flat rows by student id and sort each student's submissions by
/// timestamp, most recent first.
///
/// The aggregate is created on the first row seen for an id and keeps that
/// row's student name. Rows whose timestamp does not parse sort after all
/// parseable ones. A `BTreeMap` keeps the serialized output stable across
/// repeated reads of the same data.
pub fn group_by_student(records: Vec<SheetRecord>) -> BTreeMap<String, StudentAggregate> {
    let mut students: BTreeMap<String, StudentAggregate> = BTreeMap::new();

    for record in records {
        let aggregate = students
            .entry(record.student_id.clone())
            .or_insert_with(|| StudentAggregate {
                student_id: record.student_id.clone(),
                student_name: record.student_name.clone(),
                submissions: Vec::new(),
            });

        aggregate.submissions.push(SubmissionEntry {
            step: parse_count(&record.step),
            score: parse_count(&record.score),
            timestamp: record.timestamp,
            data: Map::new(),
        });
    }

    for student in students.values_mut() {
        student
            .submissions
            .sort_by_cached_key(|submission| Reverse(parse_timestamp(&submission.timestamp)));
    }

    students
}

fn parse_count(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}
