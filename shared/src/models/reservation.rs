//! Reservation Model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of physical tables the restaurant can seat per day
pub const TOTAL_TABLES: u8 = 10;

/// Smallest accepted party
pub const MIN_PARTY_SIZE: u32 = 1;

/// Largest accepted party
pub const MAX_PARTY_SIZE: u32 = 20;

/// Table number, `1..=TOTAL_TABLES`
pub type TableNumber = u8;

/// Reservation kind chosen by the customer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationType {
    /// Regular seating (stored as "Umum" by older data files)
    #[default]
    #[serde(alias = "Umum")]
    Standard,
    #[serde(rename = "VIP")]
    Vip,
}

impl ReservationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Vip => "VIP",
        }
    }
}

impl std::fmt::Display for ReservationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table binding of a reservation
///
/// Serialized as `null` (unassigned) or the table number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<TableNumber>", into = "Option<TableNumber>")]
pub enum TableAssignment {
    #[default]
    Unassigned,
    Assigned(TableNumber),
}

impl TableAssignment {
    pub fn table(&self) -> Option<TableNumber> {
        match self {
            Self::Unassigned => None,
            Self::Assigned(n) => Some(*n),
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }
}

impl From<Option<TableNumber>> for TableAssignment {
    fn from(value: Option<TableNumber>) -> Self {
        value.map_or(Self::Unassigned, Self::Assigned)
    }
}

impl From<TableAssignment> for Option<TableNumber> {
    fn from(value: TableAssignment) -> Self {
        value.table()
    }
}

/// Lifecycle state derived from the table binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Assigned,
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Timestamp-derived id, unique within the book
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Older records may omit the party size; they count as one guest
    #[serde(
        alias = "jumlah_orang",
        default = "party_size::legacy_default",
        deserialize_with = "party_size::deserialize"
    )]
    pub party_size: u32,
    pub date: NaiveDate,
    /// Free-form "HH:MM", carried as entered
    pub time: String,
    #[serde(rename = "type")]
    pub reservation_type: ReservationType,
    #[serde(default)]
    pub table: TableAssignment,
    #[serde(with = "created_at_format")]
    pub created_at: NaiveDateTime,
}

impl Reservation {
    pub fn status(&self) -> ReservationStatus {
        if self.table.is_assigned() {
            ReservationStatus::Assigned
        } else {
            ReservationStatus::Pending
        }
    }

    /// Assigned table number, if any
    pub fn table_number(&self) -> Option<TableNumber> {
        self.table.table()
    }
}

/// Submission payload from the reservation form
///
/// Every field arrives as raw text; missing fields deserialize to empty
/// strings so the validator can report them by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Raw text as typed; a JSON number is kept as its decimal text
    #[serde(default, deserialize_with = "party_size::deserialize_text")]
    pub party_size: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(rename = "type", default)]
    pub reservation_type: ReservationType,
}

/// Free tables remaining on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub available: u8,
}

/// Party size is accepted as a JSON number or a numeric string
mod party_size {
    use serde::{Deserialize, Deserializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    pub fn legacy_default() -> u32 {
        1
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawInput {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    /// Form input: numbers become their text, `null` becomes empty
    pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawInput>::deserialize(deserializer)? {
            None => String::new(),
            Some(RawInput::Integer(n)) => n.to_string(),
            Some(RawInput::Float(n)) => n.to_string(),
            Some(RawInput::Text(s)) => s,
        })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid party size: {s}"))),
        }
    }
}

/// `created_at` is stored as "YYYY-MM-DD HH:MM:SS"
mod created_at_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
    }
}

pub use created_at_format::FORMAT as CREATED_AT_FORMAT;
