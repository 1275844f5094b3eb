//! Static hazards on the road

use std::fmt;
use std::str::FromStr;

use super::error::{finite, positive, SimResult};
use super::types::{HazardId, Position};

/// What kind of obstacle a hazard represents
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HazardKind {
    Roadblock,
    Accident,
    Other(String),
}

impl From<&str> for HazardKind {
    fn from(tag: &str) -> Self {
        let tag = tag.trim();
        match tag.to_ascii_uppercase().as_str() {
            "ROADBLOCK" => HazardKind::Roadblock,
            "ACCIDENT" => HazardKind::Accident,
            _ => HazardKind::Other(tag.to_string()),
        }
    }
}

impl FromStr for HazardKind {
    type Err = std::convert::Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(tag))
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardKind::Roadblock => f.write_str("ROADBLOCK"),
            HazardKind::Accident => f.write_str("ACCIDENT"),
            HazardKind::Other(tag) => f.write_str(tag),
        }
    }
}

/// Verification state reported by the alert pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HazardStatus {
    #[default]
    Tentative,
    Verified,
}

/// A hazard as delivered by the ingestion collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct HazardReport {
    pub kind: HazardKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub status: HazardStatus,
}

impl HazardReport {
    pub fn new(kind: impl Into<HazardKind>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind: kind.into(),
            x,
            y,
            width,
            height,
            status: HazardStatus::default(),
        }
    }

    pub fn verified(mut self) -> Self {
        self.status = HazardStatus::Verified;
        self
    }
}

/// A static obstacle with a rectangular footprint centred on `position`.
///
/// Fields are private: a hazard never moves or resizes once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    id: HazardId,
    kind: HazardKind,
    position: Position,
    width: f32,
    height: f32,
    status: HazardStatus,
}

impl Hazard {
    pub fn new(id: HazardId, report: HazardReport) -> SimResult<Self> {
        let x = finite("hazard x", report.x)?;
        let y = finite("hazard y", report.y)?;
        let width = positive("hazard width", report.width)?;
        let height = positive("hazard height", report.height)?;

        Ok(Self {
            id,
            kind: report.kind,
            position: Position::new(x, y),
            width,
            height,
            status: report.status,
        })
    }

    pub fn id(&self) -> HazardId {
        self.id
    }

    pub fn kind(&self) -> &HazardKind {
        &self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn status(&self) -> HazardStatus {
        self.status
    }

    /// x of the side facing oncoming traffic
    pub fn leading_edge(&self) -> f32 {
        self.position.x - self.width / 2.0
    }

    /// Whether the footprint spans the lane at `lane_y`
    pub fn covers_lane(&self, lane_y: f32) -> bool {
        (lane_y - self.position.y).abs() <= self.height / 2.0
    }
}
