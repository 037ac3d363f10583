use std::fmt;

/// Placeholder written in place of every missing or unknown value
pub const SENTINEL: &str = "N/A";

/// Raw tokens that mean "unknown" in every dataset
pub const COMMON_SENTINEL_TOKENS: &[&str] = &["-", "\\N", "NAN", ""];

/// Node label in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeLabel {
    Airport,
    Airline,
    Route,
}

impl NodeLabel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeLabel::Airport => "Airport",
            NodeLabel::Airline => "Airline",
            NodeLabel::Route => "Route",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the cleaner does with a raw column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRole {
    /// Written to the cleaned file after sentinel normalization
    Keep,
    /// Not needed downstream
    Drop,
    /// Y/N flag: anything other than `Y` becomes `default`
    Flag { default: &'static str },
}

/// Column definition, in raw positional order
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub role: ColumnRole,
}

impl Column {
    pub const fn keep(name: &'static str) -> Self {
        Self {
            name,
            role: ColumnRole::Keep,
        }
    }

    pub const fn dropped(name: &'static str) -> Self {
        Self {
            name,
            role: ColumnRole::Drop,
        }
    }

    pub const fn flag(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            role: ColumnRole::Flag { default },
        }
    }

    pub fn is_kept(&self) -> bool {
        self.role != ColumnRole::Drop
    }
}

/// Rows to discard after sentinel normalization
#[derive(Debug, Clone)]
pub struct RowFilter {
    /// Column holding an integer identifier
    pub column: &'static str,
    /// Identifier values whose rows are dropped
    pub excluded_ids: &'static [i64],
}

/// Dataset layout: raw columns, file names and cleaning rules
#[derive(Debug, Clone)]
pub struct DatasetSchema {
    pub name: &'static str,
    pub label: NodeLabel,
    /// File name inside the raw directory
    pub raw_file: &'static str,
    /// File name inside the clean directory (or under the source URL)
    pub clean_file: &'static str,
    /// Upstream OpenFlights file this dataset is fetched from
    pub upstream_file: &'static str,
    pub columns: &'static [Column],
    /// Tokens treated as unknown on top of [`COMMON_SENTINEL_TOKENS`]
    pub extra_sentinels: &'static [&'static str],
    pub row_filter: Option<RowFilter>,
}

impl DatasetSchema {
    /// Number of columns in the raw, headerless file
    pub fn raw_width(&self) -> usize {
        self.columns.len()
    }

    /// Header of the cleaned file
    pub fn kept_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.is_kept())
            .map(|c| c.name)
            .collect()
    }

    /// Raw position of a column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn is_sentinel(&self, value: &str) -> bool {
        COMMON_SENTINEL_TOKENS.contains(&value) || self.extra_sentinels.contains(&value)
    }
}
