//! Query parameters and the per-endpoint rules that constrain them.
//!
//! # Design
//! Each endpoint declares a fixed `ParamSpec` of required and optional
//! parameter names. A `Query` is checked against that `ParamSpec` before a request
//! is built, so a bad name or value never reaches the network. Values are
//! rendered as the registry expects them: flags as `true`/`false`, counts as
//! decimal integers.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SudregError};

pub const EXPAND_RELATIONS: &str = "expand_relations";
pub const HISTORY_COLUMNS: &str = "history_columns";
pub const OFFSET: &str = "offset";
pub const LIMIT: &str = "limit";
pub const SNAPSHOT_ID: &str = "snapshot_id";
pub const NO_DATA_ERROR: &str = "no_data_error";
pub const OMIT_NULLS: &str = "omit_nulls";
pub const IDENTIFIER_TYPE: &str = "tip_identifikatora";
pub const IDENTIFIER: &str = "identifikator";
pub const COMPANY_NAME: &str = "tvrtka_naziv";
pub const ONLY_ACTIVE: &str = "only_active";

/// How a registry subject is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierType {
    /// Personal identification number assigned by the tax administration.
    Oib,
    /// Registry number assigned by the commercial court.
    Mbs,
}

impl IdentifierType {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierType::Oib => "oib",
            IdentifierType::Mbs => "mbs",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierType {
    type Err = SudregError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "oib" => Ok(IdentifierType::Oib),
            "mbs" => Ok(IdentifierType::Mbs),
            other => Err(SudregError::Validation(format!(
                "{IDENTIFIER_TYPE} must be 'oib' or 'mbs', got '{other}'"
            ))),
        }
    }
}

/// The shape a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Flag,
    Count,
    Text,
    IdentifierType,
}

impl ParamKind {
    pub fn of(name: &str) -> Self {
        match name {
            EXPAND_RELATIONS | HISTORY_COLUMNS | NO_DATA_ERROR | OMIT_NULLS | ONLY_ACTIVE => {
                ParamKind::Flag
            }
            OFFSET | LIMIT | SNAPSHOT_ID => ParamKind::Count,
            IDENTIFIER_TYPE => ParamKind::IdentifierType,
            _ => ParamKind::Text,
        }
    }

    fn check(self, name: &str, value: &str) -> Result<()> {
        let ok = match self {
            ParamKind::Flag => matches!(value, "true" | "false"),
            ParamKind::Count => value.parse::<u64>().is_ok(),
            ParamKind::Text => !value.trim().is_empty(),
            ParamKind::IdentifierType => return value.parse::<IdentifierType>().map(|_| ()),
        };
        if ok {
            Ok(())
        } else {
            let expected = match self {
                ParamKind::Flag => "`true` or `false`",
                ParamKind::Count => "a non-negative integer",
                _ => "a non-empty string",
            };
            Err(SudregError::Validation(format!(
                "{name} must be {expected}, got '{value}'"
            )))
        }
    }
}

/// Ordered query parameters for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, name: &str, value: impl Into<String>) -> Self {
        self.pairs.push((name.to_string(), value.into()));
        self
    }

    pub fn flag(self, name: &str, value: Option<bool>) -> Self {
        match value {
            Some(v) => self.push(name, if v { "true" } else { "false" }),
            None => self,
        }
    }

    pub fn count(self, name: &str, value: Option<u64>) -> Self {
        match value {
            Some(v) => self.push(name, v.to_string()),
            None => self,
        }
    }

    pub fn text(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.push(name, v),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Parameter names an endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl ParamSpec {
    pub fn accepts(&self, name: &str) -> bool {
        self.required.contains(&name) || self.optional.contains(&name)
    }

    /// Reject unknown names, duplicates, malformed values and missing
    /// required names. `endpoint` only labels the error messages.
    pub fn check(&self, endpoint: &str, query: &Query) -> Result<()> {
        for (index, (name, value)) in query.pairs().iter().enumerate() {
            if !self.accepts(name) {
                return Err(SudregError::Validation(format!(
                    "parameter `{name}` is not accepted by `{endpoint}`"
                )));
            }
            if query.pairs()[..index].iter().any(|(seen, _)| seen == name) {
                return Err(SudregError::Validation(format!(
                    "parameter `{name}` given more than once"
                )));
            }
            ParamKind::of(name).check(name, value)?;
        }
        if let Some(missing) = self.required.iter().find(|name| !query.contains(name)) {
            return Err(SudregError::Validation(format!(
                "`{endpoint}` requires parameter `{missing}`"
            )));
        }
        Ok(())
    }
}

/// Options shared by the codebook endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodebookOptions {
    /// Inline rows from linked codebooks instead of bare foreign-key ids.
    pub expand_relations: Option<bool>,
    /// Include the STATUS, VRIJEDI_OD and VRIJEDI_DO history columns.
    pub history_columns: Option<bool>,
}

/// Offset/limit paging. The service returns 1000 rows when `limit` is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl Page {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub(crate) fn apply(self, query: Query) -> Query {
        query.count(OFFSET, self.offset).count(LIMIT, self.limit)
    }
}

/// Filters for the subject listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectFilter {
    pub company_name: Option<String>,
    pub only_active: Option<bool>,
    pub page: Page,
}
