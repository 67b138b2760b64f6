//! Widget identity and classification types
//!
//! These are pure data structures with NO host access.
//! The core subsystem and the simulated host both speak in these terms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content-type tag of the widget that carries the 3D render surface.
/// Hiding it stops the game from drawing, so it is never touched.
pub const RENDER_SURFACE_CONTENT_TYPE: ContentType = ContentType(1337);

/// Stable, well-known widget identity: interface group in the high 16 bits,
/// child index in the low 16 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u32);

impl ComponentId {
    pub const fn new(group: u16, child: u16) -> Self {
        Self(((group as u32) << 16) | child as u32)
    }

    pub const fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    pub fn group(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub fn child(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group(), self.child())
    }
}

impl FromStr for ComponentId {
    type Err = String;

    /// Accepts either `group:child` or a packed decimal id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((group, child)) = s.split_once(':') {
            let group = group
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("invalid group in '{}': {}", s, e))?;
            let child = child
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("invalid child in '{}': {}", s, e))?;
            return Ok(Self::new(group, child));
        }

        s.parse::<u32>()
            .map(Self::from_packed)
            .map_err(|e| format!("invalid component id '{}': {}", s, e))
    }
}

impl Serialize for ComponentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ComponentId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Opaque reference to a host-owned widget node.
///
/// Only valid for the duration of the traversal that produced it; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetHandle(pub usize);

/// Host-assigned content-type tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(pub i32);

impl ContentType {
    pub const NONE: ContentType = ContentType(0);
}

/// Host display mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Fixed-size, non-resizable viewport. Hiding is unsafe here.
    Fixed,
    Resizable,
}

impl DisplayMode {
    pub fn is_resized(&self) -> bool {
        matches!(self, DisplayMode::Resizable)
    }

    pub fn toggled(&self) -> Self {
        match self {
            DisplayMode::Fixed => DisplayMode::Resizable,
            DisplayMode::Resizable => DisplayMode::Fixed,
        }
    }
}

/// Resizable skin variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutVariant {
    /// Bottom-line stone bar
    Modern,
    /// Old school side box
    Classic,
}

impl LayoutVariant {
    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutVariant::Modern => "Modern",
            LayoutVariant::Classic => "Classic",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            LayoutVariant::Modern => LayoutVariant::Classic,
            LayoutVariant::Classic => LayoutVariant::Modern,
        }
    }
}
