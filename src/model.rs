use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::EngineError;
use crate::time::{DateKey, Minute};

/// Unix milliseconds — record timestamps only, never booking times.
pub type Ms = i64;

/// Half-open minute-of-day interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Minute,
    pub end: Minute,
}

impl TimeRange {
    pub fn new(start: Minute, end: Minute) -> Self {
        debug_assert!(start < end, "TimeRange start must be before end");
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> Minute {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A bookable room or device pool. Closed enumeration: each resource is an
/// independent conflict domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    #[serde(rename = "R. Integritas")]
    Integritas,
    #[serde(rename = "R. Profesionalisme")]
    Profesionalisme,
    #[serde(rename = "R. Sinergi")]
    Sinergi,
    #[serde(rename = "R. Inklusif")]
    Inklusif,
    #[serde(rename = "R. Visioner")]
    Visioner,
    #[serde(rename = "Aula INPRESIV")]
    AulaInpresiv,
    #[serde(rename = "R. Visinergi")]
    Visinergi,
    #[serde(rename = "Akun Zoom")]
    ZoomAccount,
    #[serde(rename = "Hanya Alat")]
    EquipmentOnly,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Integritas,
        Resource::Profesionalisme,
        Resource::Sinergi,
        Resource::Inklusif,
        Resource::Visioner,
        Resource::AulaInpresiv,
        Resource::Visinergi,
        Resource::ZoomAccount,
        Resource::EquipmentOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Integritas => "R. Integritas",
            Resource::Profesionalisme => "R. Profesionalisme",
            Resource::Sinergi => "R. Sinergi",
            Resource::Inklusif => "R. Inklusif",
            Resource::Visioner => "R. Visioner",
            Resource::AulaInpresiv => "Aula INPRESIV",
            Resource::Visinergi => "R. Visinergi",
            Resource::ZoomAccount => "Akun Zoom",
            Resource::EquipmentOnly => "Hanya Alat",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .iter()
            .find(|r| r.as_str() == s)
            .copied()
            .ok_or_else(|| EngineError::UnknownResource(s.to_string()))
    }
}

/// A shared equipment item. Closed enumeration; the last two exist only as
/// room built-ins and own no shared inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Equipment {
    #[serde(rename = "LCD Proyektor")]
    LcdProjector,
    #[serde(rename = "Zoom Dedicated (Profesionalisme)")]
    ZoomDedicated,
    #[serde(rename = "Zoom Mobile")]
    ZoomMobile,
    #[serde(rename = "Recording")]
    Recording,
    #[serde(rename = "Pointer")]
    Pointer,
    #[serde(rename = "Printer Portable")]
    PortablePrinter,
    #[serde(rename = "Mic Ashley Mobile")]
    MicAshley,
    #[serde(rename = "Speaker Portable")]
    PortableSpeaker,
    #[serde(rename = "Screen Proyektor")]
    ProjectorScreen,
    #[serde(rename = "Video Wall (Inpresiv Built-in)")]
    VideoWall,
    #[serde(rename = "Monitor Cisco (Inklusif Built-in)")]
    CiscoMonitor,
}

impl Equipment {
    pub const ALL: [Equipment; 11] = [
        Equipment::LcdProjector,
        Equipment::ZoomDedicated,
        Equipment::ZoomMobile,
        Equipment::Recording,
        Equipment::Pointer,
        Equipment::PortablePrinter,
        Equipment::MicAshley,
        Equipment::PortableSpeaker,
        Equipment::ProjectorScreen,
        Equipment::VideoWall,
        Equipment::CiscoMonitor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::LcdProjector => "LCD Proyektor",
            Equipment::ZoomDedicated => "Zoom Dedicated (Profesionalisme)",
            Equipment::ZoomMobile => "Zoom Mobile",
            Equipment::Recording => "Recording",
            Equipment::Pointer => "Pointer",
            Equipment::PortablePrinter => "Printer Portable",
            Equipment::MicAshley => "Mic Ashley Mobile",
            Equipment::PortableSpeaker => "Speaker Portable",
            Equipment::ProjectorScreen => "Screen Proyektor",
            Equipment::VideoWall => "Video Wall (Inpresiv Built-in)",
            Equipment::CiscoMonitor => "Monitor Cisco (Inklusif Built-in)",
        }
    }

    pub fn description(&self) -> Option<&'static str> {
        match self {
            Equipment::ZoomDedicated => Some("Fixed di R. Profesionalisme"),
            Equipment::ZoomMobile => Some("Kondisi agak rusak"),
            Equipment::MicAshley => Some("2 set (4 mic, 2 receiver)"),
            _ => None,
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Equipment {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Equipment::ALL
            .iter()
            .find(|e| e.as_str() == s)
            .copied()
            .ok_or_else(|| EngineError::UnknownEquipment(s.to_string()))
    }
}

/// Static reference data: shared inventory quantities, per-room built-in
/// equipment, and per-room manual exclusions. Not user-mutable at runtime.
#[derive(Debug, Clone)]
pub struct Catalog {
    quantities: BTreeMap<Equipment, u16>,
    built_in: BTreeMap<Resource, BTreeSet<Equipment>>,
    excluded: BTreeMap<Resource, BTreeSet<Equipment>>,
}

impl Catalog {
    /// The office's standard inventory. Built-ins (video wall, Cisco
    /// monitor) deliberately have no entry: they are not shared stock.
    pub fn standard() -> Self {
        let quantities = BTreeMap::from([
            (Equipment::LcdProjector, 3),
            (Equipment::ZoomDedicated, 1),
            (Equipment::ZoomMobile, 1),
            (Equipment::Recording, 2),
            (Equipment::Pointer, 3),
            (Equipment::PortablePrinter, 2),
            (Equipment::MicAshley, 2),
            (Equipment::PortableSpeaker, 2),
            (Equipment::ProjectorScreen, 2),
        ]);
        let built_in = BTreeMap::from([
            (Resource::AulaInpresiv, BTreeSet::from([Equipment::VideoWall])),
            (Resource::Inklusif, BTreeSet::from([Equipment::CiscoMonitor])),
        ]);
        // Rooms with a built-in display don't get the standalone projector
        // in their selectable list.
        let excluded = BTreeMap::from([
            (Resource::AulaInpresiv, BTreeSet::from([Equipment::LcdProjector])),
            (Resource::Inklusif, BTreeSet::from([Equipment::LcdProjector])),
        ]);
        Self { quantities, built_in, excluded }
    }

    pub fn custom(
        quantities: BTreeMap<Equipment, u16>,
        built_in: BTreeMap<Resource, BTreeSet<Equipment>>,
        excluded: BTreeMap<Resource, BTreeSet<Equipment>>,
    ) -> Self {
        Self { quantities, built_in, excluded }
    }

    /// Total configured quantity; `None` when the item is not shared stock.
    pub fn quantity(&self, equipment: Equipment) -> Option<u16> {
        self.quantities.get(&equipment).copied()
    }

    /// All shared-stock items, in catalog order.
    pub fn inventory(&self) -> impl Iterator<Item = (Equipment, u16)> + '_ {
        self.quantities.iter().map(|(e, q)| (*e, *q))
    }

    pub fn built_in(&self, resource: Resource) -> &BTreeSet<Equipment> {
        static EMPTY: BTreeSet<Equipment> = BTreeSet::new();
        self.built_in.get(&resource).unwrap_or(&EMPTY)
    }

    pub fn excluded(&self, resource: Resource) -> &BTreeSet<Equipment> {
        static EMPTY: BTreeSet<Equipment> = BTreeSet::new();
        self.excluded.get(&resource).unwrap_or(&EMPTY)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// Only pending/approved bookings constrain conflicts and stock;
    /// rejected bookings are inert.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomLayout {
    #[serde(rename = "U-Shape")]
    UShape,
    Classroom,
    Lesehan,
    #[serde(rename = "Room Table")]
    RoomTable,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Division {
    #[serde(rename = "FPEPK (LIKD)")]
    FpepkLikd,
    #[serde(rename = "FPEPK (MCSK)")]
    FpepkMcsk,
    #[serde(rename = "FPLJK 1")]
    Fpljk1,
    #[serde(rename = "FPLJK 2")]
    Fpljk2,
    #[serde(rename = "FPLJK 3")]
    Fpljk3,
    #[serde(rename = "LMST")]
    Lmst,
}

impl Division {
    pub fn as_str(&self) -> &'static str {
        match self {
            Division::FpepkLikd => "FPEPK (LIKD)",
            Division::FpepkMcsk => "FPEPK (MCSK)",
            Division::Fpljk1 => "FPLJK 1",
            Division::Fpljk2 => "FPLJK 2",
            Division::Fpljk3 => "FPLJK 3",
            Division::Lmst => "LMST",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Authenticated caller, as handed over by the external user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub division: Division,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A proposed booking, before admission. Value object: the admission check
/// takes it together with the relevant existing bookings and decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub resource: Resource,
    pub date: DateKey,
    pub range: TimeRange,
    pub equipment: BTreeSet<Equipment>,
    pub participant_count: u32,
    pub borrower_name: String,
    pub division: Division,
    pub activity: String,
    pub layout: Option<RoomLayout>,
    pub notes: Option<String>,
}

/// A persisted booking record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    pub resource: Resource,
    pub date: DateKey,
    pub range: TimeRange,
    pub status: BookingStatus,
    pub equipment: BTreeSet<Equipment>,
    pub participant_count: u32,
    pub borrower_name: String,
    pub division: Division,
    pub activity: String,
    pub layout: Option<RoomLayout>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: Ms,
}

impl Booking {
    /// Materialize an admitted draft as a pending record.
    pub fn pending(draft: BookingDraft, id: Ulid, created_by: String, created_at: Ms) -> Self {
        Self {
            id,
            resource: draft.resource,
            date: draft.date,
            range: draft.range,
            status: BookingStatus::Pending,
            equipment: draft.equipment,
            participant_count: draft.participant_count,
            borrower_name: draft.borrower_name,
            division: draft.division,
            activity: draft.activity,
            layout: draft.layout,
            notes: draft.notes,
            created_by,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
