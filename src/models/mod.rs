//! Data models for GearGuard

pub mod audit;
pub mod category;
pub mod directory;
pub mod enums;
pub mod equipment;
pub mod request;
pub mod stage;
pub mod team;
pub mod user;
pub mod work_center;

// Re-export commonly used types
pub use audit::{FieldChange, FieldChangeEntry, RecordMessage};
pub use category::EquipmentCategory;
pub use directory::{Department, Employee, Vendor};
pub use enums::{KanbanState, OwnershipType, Priority, RecordType, RequestType, WarrantyStatus};
pub use equipment::Equipment;
pub use request::MaintenanceRequest;
pub use stage::MaintenanceStage;
pub use team::MaintenanceTeam;
pub use user::{User, UserClaims, UserRights};
pub use work_center::WorkCenter;
