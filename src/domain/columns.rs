use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CATEGORY_COUNT: usize = 6;

/// Baseline Requirements violation tracked per issuer per bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    ValidPeriodTooLong,
    DeprecatedVersion,
    DeprecatedSignatureAlgorithm,
    #[serde(rename = "missingCNinSAN")]
    MissingCnInSan,
    KeyTooShort,
    ExpTooSmall,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::ValidPeriodTooLong,
        Category::DeprecatedVersion,
        Category::DeprecatedSignatureAlgorithm,
        Category::MissingCnInSan,
        Category::KeyTooShort,
        Category::ExpTooSmall,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::ValidPeriodTooLong => "validPeriodTooLong",
            Category::DeprecatedVersion => "deprecatedVersion",
            Category::DeprecatedSignatureAlgorithm => "deprecatedSignatureAlgorithm",
            Category::MissingCnInSan => "missingCNinSAN",
            Category::KeyTooShort => "keyTooShort",
            Category::ExpTooSmall => "expTooSmall",
        }
    }

    /// Position in [`Category::ALL`], used to index per-row category arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn example_column(self) -> String {
        format!("{}Example", self.as_str())
    }

    pub fn last_seen_column(self) -> String {
        format!("{}LastSeen", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    #[default]
    Raw,
    Normalized,
}

impl ScoreKind {
    pub fn suffix(self) -> &'static str {
        match self {
            ScoreKind::Raw => "RawScore",
            ScoreKind::Normalized => "NormalizedScore",
        }
    }

    fn overall_column(self) -> &'static str {
        match self {
            ScoreKind::Raw => "rawScore",
            ScoreKind::Normalized => "normalizedScore",
        }
    }
}

/// Selects one numeric column of a measurement row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    RawCount,
    ValidCount,
    Score(ScoreKind),
    CategoryScore(Category, ScoreKind),
    CategoryCount(Category),
}

impl Column {
    pub fn name(self) -> String {
        match self {
            Column::RawCount => "rawCount".to_string(),
            Column::ValidCount => "validCount".to_string(),
            Column::Score(kind) => kind.overall_column().to_string(),
            Column::CategoryScore(cat, kind) => format!("{}{}", cat.as_str(), kind.suffix()),
            Column::CategoryCount(cat) => format!("{}Count", cat.as_str()),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rawCount" => return Ok(Column::RawCount),
            "validCount" => return Ok(Column::ValidCount),
            "rawScore" => return Ok(Column::Score(ScoreKind::Raw)),
            "normalizedScore" => return Ok(Column::Score(ScoreKind::Normalized)),
            _ => {}
        }
        for cat in Category::ALL {
            let Some(rest) = s.strip_prefix(cat.as_str()) else {
                continue;
            };
            match rest {
                "RawScore" => return Ok(Column::CategoryScore(cat, ScoreKind::Raw)),
                "NormalizedScore" => return Ok(Column::CategoryScore(cat, ScoreKind::Normalized)),
                "Count" => return Ok(Column::CategoryCount(cat)),
                _ => {}
            }
        }
        Err(UnknownColumn(s.to_string()))
    }
}
