use crate::constants::{MM_PER_INCH, POINTS_PER_INCH};
use crate::spec::FieldError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("No page with id {0}")]
    NotFound(PageId),
    #[error("{role} page {id} cannot move to index {to}: covers and spine are pinned")]
    InvalidBindingMove { id: PageId, role: PageRole, to: usize },
    #[error("Page {0} is blank; remove it and insert a content page instead")]
    RoleMismatch(PageId),
    #[error("Spine page present but binding is not perfect bound")]
    UnexpectedSpine,
    #[error("Invalid specification: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    InvalidSpecification(Vec<FieldError>),
    #[error("Page size {page} does not fit on sheet {sheet}")]
    DimensionMismatch { page: Dimensions, sheet: Dimensions },
    #[error("Page size {page} tiles sheet {sheet} more than {max_cells} times")]
    GridTooLarge {
        page: Dimensions,
        sheet: Dimensions,
        max_cells: usize,
    },
    #[error("Page sequence is malformed: {0}")]
    MalformedSequence(String),
    #[error("No interior pages to impose")]
    EmptySequence,
    #[error("No interior pages supplied")]
    MissingInterior,
    #[error("Page {page_index} is out of range for document {document} ({page_count} pages)")]
    PageOutOfRange {
        document: DocumentId,
        page_index: usize,
        page_count: usize,
    },
    #[error("{role} must be exactly one page, got {pages}")]
    SinglePageRole { role: PageRole, pages: usize },
    #[error("Unknown document {0}")]
    UnknownDocument(DocumentId),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Opaque identifier of a page entry, unique within one sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a source document held by the external document store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single page of a source document (0-based page index)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRef {
    pub document: DocumentId,
    pub page_index: usize,
}

impl SourceRef {
    pub fn new(document: impl Into<String>, page_index: usize) -> Self {
        Self {
            document: DocumentId::new(document),
            page_index,
        }
    }
}

/// Structural role of a page within the built document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PageRole {
    CoverFront,
    Interior,
    Spine,
    CoverBack,
    Blank,
}

impl PageRole {
    /// Covers and spine sit at fixed positions at the sequence boundaries
    pub fn is_pinned(self) -> bool {
        matches!(
            self,
            PageRole::CoverFront | PageRole::Spine | PageRole::CoverBack
        )
    }

    /// Interior and blank pages take part in signature numbering
    pub fn is_interior_eligible(self) -> bool {
        matches!(self, PageRole::Interior | PageRole::Blank)
    }
}

impl fmt::Display for PageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PageRole::CoverFront => "cover-front",
            PageRole::Interior => "interior",
            PageRole::Spine => "spine",
            PageRole::CoverBack => "cover-back",
            PageRole::Blank => "blank",
        })
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height >= width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Rotation for pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Parse a right-angle rotation, normalizing negative and full turns
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Clockwise90),
            180 => Some(Rotation::Clockwise180),
            270 => Some(Rotation::Clockwise270),
            _ => None,
        }
    }
}

/// Measurement units for physical sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Units {
    #[default]
    Inches,
    Millimeters,
    Points,
}

impl Units {
    /// Points per one unit
    pub fn points_per_unit(self) -> f32 {
        match self {
            Units::Inches => POINTS_PER_INCH,
            Units::Millimeters => POINTS_PER_INCH / MM_PER_INCH,
            Units::Points => 1.0,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Units::Inches => "in",
            Units::Millimeters => "mm",
            Units::Points => "pt",
        }
    }
}

/// A single measurement (creep, spine width)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    pub value: f32,
    pub units: Units,
}

impl Length {
    pub fn new(value: f32, units: Units) -> Self {
        Self { value, units }
    }

    pub fn to_points(self) -> f32 {
        self.value * self.units.points_per_unit()
    }
}

/// Width and height of a page or sheet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub units: Units,
}

impl Dimensions {
    pub fn new(width: f32, height: f32, units: Units) -> Self {
        Self {
            width,
            height,
            units,
        }
    }

    pub fn inches(width: f32, height: f32) -> Self {
        Self::new(width, height, Units::Inches)
    }

    pub fn points(width: f32, height: f32) -> Self {
        Self::new(width, height, Units::Points)
    }

    /// (width, height) in points
    pub fn to_points(self) -> (f32, f32) {
        let k = self.units.points_per_unit();
        (self.width * k, self.height * k)
    }

    pub fn orientation(self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Swap width and height
    pub fn rotated(self) -> Self {
        Self::new(self.height, self.width, self.units)
    }

    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} {}",
            self.width,
            self.height,
            self.units.suffix()
        )
    }
}

/// Summary of a planned imposition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpositionStatistics {
    /// Entries in the page sequence (covers and spine included)
    pub sequence_pages: usize,
    /// Interior and blank entries before padding
    pub interior_pages: usize,
    /// Physical sheets, cover sheet included
    pub output_sheets: usize,
    /// Printed sides (front and back of each sheet that carries content)
    pub output_sides: usize,
    /// Blank pages appended to complete the last signature
    pub blank_pages_added: usize,
    /// Page positions on one side of a sheet
    pub slots_per_side: usize,
}
