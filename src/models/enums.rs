//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// OwnershipType
// ---------------------------------------------------------------------------

/// Who uses a piece of equipment (stored as text slug)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipType {
    Company,
    Department,
    Employee,
}

impl OwnershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipType::Company => "company",
            OwnershipType::Department => "department",
            OwnershipType::Employee => "employee",
        }
    }
}

impl std::fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OwnershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "company" => Ok(OwnershipType::Company),
            "department" => Ok(OwnershipType::Department),
            "employee" => Ok(OwnershipType::Employee),
            _ => Err(format!("Invalid ownership type: {}", s)),
        }
    }
}

impl From<OwnershipType> for String {
    fn from(v: OwnershipType) -> Self {
        v.as_str().to_string()
    }
}

impl sqlx::Type<Postgres> for OwnershipType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for OwnershipType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for OwnershipType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// RequestType
// ---------------------------------------------------------------------------

/// Kind of maintenance work (stored as text slug)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Corrective,
    Preventive,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Corrective => "corrective",
            RequestType::Preventive => "preventive",
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "corrective" => Ok(RequestType::Corrective),
            "preventive" => Ok(RequestType::Preventive),
            _ => Err(format!("Invalid request type: {}", s)),
        }
    }
}

impl From<RequestType> for String {
    fn from(v: RequestType) -> Self {
        v.as_str().to_string()
    }
}

impl sqlx::Type<Postgres> for RequestType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RequestType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RequestType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// KanbanState
// ---------------------------------------------------------------------------

/// Per-card progress flag shown on the kanban board (stored as text slug)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum KanbanState {
    Normal,
    Done,
    Blocked,
}

impl KanbanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            KanbanState::Normal => "normal",
            KanbanState::Done => "done",
            KanbanState::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for KanbanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for KanbanState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(KanbanState::Normal),
            "done" => Ok(KanbanState::Done),
            "blocked" => Ok(KanbanState::Blocked),
            _ => Err(format!("Invalid kanban state: {}", s)),
        }
    }
}

impl From<KanbanState> for String {
    fn from(v: KanbanState) -> Self {
        v.as_str().to_string()
    }
}

impl sqlx::Type<Postgres> for KanbanState {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for KanbanState {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for KanbanState {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Request priority (stored as smallint 0..3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
    Urgent = 3,
}

impl From<i16> for Priority {
    fn from(v: i16) -> Self {
        match v {
            0 => Priority::Low,
            2 => Priority::High,
            3 => Priority::Urgent,
            _ => Priority::Normal,
        }
    }
}

impl From<Priority> for i16 {
    fn from(p: Priority) -> Self {
        p as i16
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// WarrantyStatus
// ---------------------------------------------------------------------------

/// Derived warranty state, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyStatus {
    Valid,
    Expired,
    Na,
}

impl std::fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            WarrantyStatus::Valid => "Valid",
            WarrantyStatus::Expired => "Expired",
            WarrantyStatus::Na => "N/A",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RecordType
// ---------------------------------------------------------------------------

/// Record families that carry an audit trail (stored as text slug)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Equipment,
    Request,
    Team,
    WorkCenter,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Equipment => "equipment",
            RecordType::Request => "request",
            RecordType::Team => "team",
            RecordType::WorkCenter => "work_center",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equipment" => Ok(RecordType::Equipment),
            "request" => Ok(RecordType::Request),
            "team" => Ok(RecordType::Team),
            "work_center" => Ok(RecordType::WorkCenter),
            _ => Err(format!("Invalid record type: {}", s)),
        }
    }
}

impl From<RecordType> for String {
    fn from(v: RecordType) -> Self {
        v.as_str().to_string()
    }
}

impl sqlx::Type<Postgres> for RecordType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RecordType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RecordType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_type_round_trips_through_slug() {
        for v in [OwnershipType::Company, OwnershipType::Department, OwnershipType::Employee] {
            assert_eq!(v.as_str().parse::<OwnershipType>(), Ok(v));
        }
        assert!("corporate".parse::<OwnershipType>().is_err());
    }

    #[test]
    fn priority_clamps_unknown_values_to_normal() {
        assert_eq!(Priority::from(0), Priority::Low);
        assert_eq!(Priority::from(3), Priority::Urgent);
        assert_eq!(Priority::from(42), Priority::Normal);
        assert_eq!(Priority::from(-1), Priority::Normal);
    }

    #[test]
    fn record_type_slug_uses_snake_case() {
        assert_eq!(RecordType::WorkCenter.as_str(), "work_center");
        assert_eq!("work_center".parse::<RecordType>(), Ok(RecordType::WorkCenter));
    }
}
