//! Match results CSV parsing.
//!
//! The data file is a comma-separated export with a header row. Columns are
//! located by name, rows from other competitions or unfinished fixtures are
//! skipped, and malformed scores or undecodable bytes drop only the offending
//! row.

use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::MatchRecord;
use crate::normalize::TeamNames;

/// Errors that abort a whole parse.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required columns not found in CSV header: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

const COMPETITION_CODE: &str = "competition_code";
const HOME_TEAM: &str = "home_team";
const AWAY_TEAM: &str = "away_team";
const FULLTIME_HOME: &str = "fulltime_home";
const FULLTIME_AWAY: &str = "fulltime_away";
const STATUS: &str = "status";

/// Filtering and naming rules applied while parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Only rows with this `competition_code` are kept
    pub competition_code: String,

    /// Only rows with this `status` are kept, when the column exists
    pub finished_status: String,

    /// Alias table for canonical team names
    pub team_names: TeamNames,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            competition_code: "FL1".to_string(),
            finished_status: "FINISHED".to_string(),
            team_names: TeamNames::default(),
        }
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub competition_code: usize,
    pub home_team: usize,
    pub away_team: usize,
    pub fulltime_home: usize,
    pub fulltime_away: usize,
    pub status: Option<usize>,
}

impl ColumnIndex {
    /// Locate columns by case-insensitive header name.
    pub fn resolve(headers: &[String]) -> Result<Self, ParseError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let competition_code = find(COMPETITION_CODE);
        let home_team = find(HOME_TEAM);
        let away_team = find(AWAY_TEAM);
        let fulltime_home = find(FULLTIME_HOME);
        let fulltime_away = find(FULLTIME_AWAY);

        match (competition_code, home_team, away_team, fulltime_home, fulltime_away) {
            (Some(competition_code), Some(home_team), Some(away_team), Some(fulltime_home), Some(fulltime_away)) => {
                Ok(Self {
                    competition_code,
                    home_team,
                    away_team,
                    fulltime_home,
                    fulltime_away,
                    status: find(STATUS),
                })
            }
            _ => {
                let missing = [
                    (COMPETITION_CODE, competition_code),
                    (HOME_TEAM, home_team),
                    (AWAY_TEAM, away_team),
                    (FULLTIME_HOME, fulltime_home),
                    (FULLTIME_AWAY, fulltime_away),
                ]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name)
                .collect();
                Err(ParseError::MissingColumns(missing))
            }
        }
    }

    /// Highest index among the required columns.
    pub fn max_required(&self) -> usize {
        self.competition_code
            .max(self.home_team)
            .max(self.away_team)
            .max(self.fulltime_home)
            .max(self.fulltime_away)
    }
}

/// Split one CSV line into fields.
///
/// A `"` toggles quoting and is not kept; commas inside quotes are literal.
/// There is no escaped-quote rule.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Why a data row was not turned into a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowSkip {
    TooShort,
    OtherCompetition,
    NotFinished,
    BadScore,
}

fn parse_row(
    fields: &[String],
    columns: &ColumnIndex,
    options: &ParseOptions,
) -> Result<MatchRecord, RowSkip> {
    if fields.len() <= columns.max_required() {
        return Err(RowSkip::TooShort);
    }

    if fields[columns.competition_code] != options.competition_code {
        return Err(RowSkip::OtherCompetition);
    }

    if let Some(status) = columns.status.and_then(|idx| fields.get(idx)) {
        if *status != options.finished_status {
            return Err(RowSkip::NotFinished);
        }
    }

    let home_goals = fields[columns.fulltime_home]
        .trim()
        .parse::<u32>()
        .map_err(|_| RowSkip::BadScore)?;
    let away_goals = fields[columns.fulltime_away]
        .trim()
        .parse::<u32>()
        .map_err(|_| RowSkip::BadScore)?;

    Ok(MatchRecord::new(
        options.team_names.canonical(&fields[columns.home_team]),
        options.team_names.canonical(&fields[columns.away_team]),
        home_goals,
        away_goals,
    ))
}

/// Read the next line into `buf` without its line terminator.
///
/// Returns `false` at end of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}

/// Parse completed matches of the target competition from CSV text.
///
/// Input without a header line yields no matches. Row-level problems,
/// including rows that are not valid UTF-8, are skipped; only I/O failures
/// and missing required columns are errors.
pub fn parse_matches<R: BufRead>(
    mut reader: R,
    options: &ParseOptions,
) -> Result<Vec<MatchRecord>, ParseError> {
    let mut buf = Vec::new();

    if !read_line(&mut reader, &mut buf)? {
        debug!("CSV input is empty");
        return Ok(Vec::new());
    }
    let header_line = String::from_utf8_lossy(&buf);
    let header = split_line(header_line.trim_start_matches('\u{feff}'));
    let columns = ColumnIndex::resolve(&header)?;
    debug!(?columns, "Resolved CSV columns");

    let mut matches = Vec::new();
    let mut rows = 0usize;
    let mut bad_scores = 0usize;
    let mut undecodable = 0usize;
    let mut line_no = 1usize;

    while read_line(&mut reader, &mut buf)? {
        line_no += 1;
        rows += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                undecodable += 1;
                debug!(line = line_no, error = %e, "Skipping row that is not valid UTF-8");
                continue;
            }
        };

        match parse_row(&split_line(line), &columns, options) {
            Ok(record) => matches.push(record),
            Err(RowSkip::BadScore) => {
                bad_scores += 1;
                debug!(line = line_no, "Skipping row with invalid score");
            }
            Err(_) => {}
        }
    }

    info!(
        rows,
        kept = matches.len(),
        skipped = rows - matches.len(),
        bad_scores,
        undecodable,
        competition = %options.competition_code,
        "Parsed match results"
    );

    Ok(matches)
}
