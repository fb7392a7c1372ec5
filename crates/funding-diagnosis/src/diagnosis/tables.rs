//! Static policy tables: per-region thresholds and per-rating leverage rows.

use super::domain::UnknownCode;
use crate::labels::normalize_label;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Spanish autonomous community used as fiscal domicile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Region {
    Galicia,
    Asturias,
    Cantabria,
    BasqueCountry,
    Navarre,
    Catalonia,
    CastileLeon,
    LaRioja,
    Aragon,
    Valencia,
    Extremadura,
    Madrid,
    CastileLaMancha,
    Andalusia,
    Murcia,
    CanaryIslands,
    BalearicIslands,
    /// Catch-all for domiciles outside the listed communities.
    Other,
}

impl Region {
    pub const ALL: [Self; 18] = [
        Self::Galicia,
        Self::Asturias,
        Self::Cantabria,
        Self::BasqueCountry,
        Self::Navarre,
        Self::Catalonia,
        Self::CastileLeon,
        Self::LaRioja,
        Self::Aragon,
        Self::Valencia,
        Self::Extremadura,
        Self::Madrid,
        Self::CastileLaMancha,
        Self::Andalusia,
        Self::Murcia,
        Self::CanaryIslands,
        Self::BalearicIslands,
        Self::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Galicia => "Galicia",
            Self::Asturias => "Asturias",
            Self::Cantabria => "Cantabria",
            Self::BasqueCountry => "País Vasco",
            Self::Navarre => "Navarra",
            Self::Catalonia => "Cataluña",
            Self::CastileLeon => "Castilla León",
            Self::LaRioja => "La Rioja",
            Self::Aragon => "Aragón",
            Self::Valencia => "Comunidad Autónoma de Valencia",
            Self::Extremadura => "Extremadura",
            Self::Madrid => "Madrid",
            Self::CastileLaMancha => "Castilla la Mancha",
            Self::Andalusia => "Andalucía",
            Self::Murcia => "Murcia",
            Self::CanaryIslands => "Canarias",
            Self::BalearicIslands => "Baleares",
            Self::Other => "Otro",
        }
    }

    /// A domicile qualifies unless it is the catch-all.
    pub const fn is_eligible_domicile(self) -> bool {
        !matches!(self, Self::Other)
    }

    pub const fn thresholds(self) -> RegionThresholds {
        match self {
            Self::Cantabria | Self::Madrid => RegionThresholds {
                min_runway_months: 12.0,
                ..DEFAULT_THRESHOLDS
            },
            _ => DEFAULT_THRESHOLDS,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl FromStr for Region {
    type Err = UnknownCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(value);
        if wanted == "other" {
            return Ok(Self::Other);
        }
        Self::ALL
            .into_iter()
            .find(|region| normalize_label(region.label()) == wanted)
            .ok_or_else(|| UnknownCode::new("region", value))
    }
}

impl TryFrom<String> for Region {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Policy constants applied per region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionThresholds {
    pub min_runway_months: f64,
    pub max_raise_age_months: f64,
    pub min_raise_amount: f64,
    pub max_risk_unaudited: f64,
    pub max_risk_audited: f64,
    pub min_in_house_rd_lender: f64,
    pub min_rd_deductions: f64,
}

pub const DEFAULT_THRESHOLDS: RegionThresholds = RegionThresholds {
    min_runway_months: 6.0,
    max_raise_age_months: 6.0,
    min_raise_amount: 100_000.0,
    max_risk_unaudited: 300_000.0,
    max_risk_audited: 1_200_000.0,
    min_in_house_rd_lender: 250_000.0,
    min_rd_deductions: 500_000.0,
};

/// Credit rating assigned by the venture-debt lender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Rating {
    A1,
    A2,
    A3,
    B1,
    B2,
    B3,
    C1,
    C2,
    C3,
}

impl Rating {
    pub const ALL: [Self; 9] = [
        Self::A1,
        Self::A2,
        Self::A3,
        Self::B1,
        Self::B2,
        Self::B3,
        Self::C1,
        Self::C2,
        Self::C3,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::C1 => "C1",
            Self::C2 => "C2",
            Self::C3 => "C3",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rating {
    type Err = UnknownCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|rating| rating.code() == wanted)
            .ok_or_else(|| UnknownCode::new("rating", value))
    }
}

impl TryFrom<String> for Rating {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether the company has audited financial history with the lender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum CompanyProfile {
    WithoutHistory,
    WithHistory,
}

impl CompanyProfile {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WithoutHistory => "Without history",
            Self::WithHistory => "With history",
        }
    }

    /// Upper bounds of the first and second capital tiers.
    pub const fn tier_bounds(self) -> (f64, f64) {
        match self {
            Self::WithoutHistory => (37_500.0, 100_000.0),
            Self::WithHistory => (300_000.0, 1_200_000.0),
        }
    }

    pub fn rating_table(self) -> &'static [RatingRow] {
        match self {
            Self::WithoutHistory => &WITHOUT_HISTORY_TABLE,
            Self::WithHistory => &WITH_HISTORY_TABLE,
        }
    }
}

impl fmt::Display for CompanyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CompanyProfile {
    type Err = UnknownCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_label(&value.replace(['_', '-'], " ")).as_str() {
            "without history" | "sin historico" => Ok(Self::WithoutHistory),
            "with history" | "con historico" => Ok(Self::WithHistory),
            _ => Err(UnknownCode::new("company profile", value)),
        }
    }
}

impl TryFrom<String> for CompanyProfile {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Absolute cap and per-tier leverage multipliers for one rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingRow {
    pub rating: Rating,
    pub absolute_cap: f64,
    pub leverage: [f64; 3],
}

const fn row(rating: Rating, absolute_cap: f64, t1: f64, t2: f64, t3: f64) -> RatingRow {
    RatingRow {
        rating,
        absolute_cap,
        leverage: [t1, t2, t3],
    }
}

static WITHOUT_HISTORY_TABLE: [RatingRow; 9] = [
    row(Rating::A1, 300_000.0, 2.00, 1.20, 0.75),
    row(Rating::A2, 285_000.0, 1.95, 1.15, 0.70),
    row(Rating::A3, 270_000.0, 1.90, 1.10, 0.65),
    row(Rating::B1, 255_000.0, 1.85, 1.05, 0.50),
    row(Rating::B2, 240_000.0, 1.80, 1.00, 0.55),
    row(Rating::B3, 225_000.0, 1.75, 0.95, 0.50),
    row(Rating::C1, 210_000.0, 1.70, 0.90, 0.45),
    row(Rating::C2, 195_000.0, 1.65, 0.85, 0.40),
    row(Rating::C3, 180_000.0, 1.60, 0.80, 0.30),
];

static WITH_HISTORY_TABLE: [RatingRow; 9] = [
    row(Rating::A1, 1_500_000.0, 1.00, 0.67, 0.33),
    row(Rating::A2, 1_335_000.0, 0.98, 0.65, 0.31),
    row(Rating::A3, 1_170_000.0, 0.96, 0.63, 0.29),
    row(Rating::B1, 1_005_000.0, 0.94, 0.61, 0.27),
    row(Rating::B2, 840_000.0, 0.92, 0.59, 0.25),
    row(Rating::B3, 675_000.0, 0.90, 0.57, 0.23),
    row(Rating::C1, 510_000.0, 0.88, 0.55, 0.21),
    row(Rating::C2, 345_000.0, 0.86, 0.53, 0.19),
    row(Rating::C3, 180_000.0, 0.84, 0.51, 0.17),
];

pub fn rating_row(profile: CompanyProfile, rating: Rating) -> Option<&'static RatingRow> {
    profile
        .rating_table()
        .iter()
        .find(|row| row.rating == rating)
}
