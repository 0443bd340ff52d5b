//! Component type tags.
//!
//! Requests and spec files carry the component type as a free-form string.
//! [`ComponentType`] is the closed set of tags that have a pricing formula,
//! with [`ComponentType::Unknown`] absorbing every other string, so parsing
//! a tag never fails.

use std::fmt;

use serde::Serialize;

use crate::pricing::PriceBounds;

/// Category of a hardware component. Selects the pricing formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentType {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    Motherboard,
    #[serde(rename = "RAM")]
    Ram,
    Storage,
    #[serde(rename = "PSU")]
    Psu,
    #[serde(rename = "PCCase")]
    PcCase,
    #[serde(rename = "CPUCooler")]
    CpuCooler,
    CaseFan,
    Unknown,
}

impl ComponentType {
    /// Every tag with its own formula, in pricing-table order.
    pub const KNOWN: [ComponentType; 9] = [
        ComponentType::Cpu,
        ComponentType::Gpu,
        ComponentType::Motherboard,
        ComponentType::Ram,
        ComponentType::Storage,
        ComponentType::Psu,
        ComponentType::PcCase,
        ComponentType::CpuCooler,
        ComponentType::CaseFan,
    ];

    /// Case-sensitive match against the wire tags.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "CPU" => ComponentType::Cpu,
            "GPU" => ComponentType::Gpu,
            "Motherboard" => ComponentType::Motherboard,
            "RAM" => ComponentType::Ram,
            "Storage" => ComponentType::Storage,
            "PSU" => ComponentType::Psu,
            "PCCase" => ComponentType::PcCase,
            "CPUCooler" => ComponentType::CpuCooler,
            "CaseFan" => ComponentType::CaseFan,
            _ => ComponentType::Unknown,
        }
    }

    /// The wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Cpu => "CPU",
            ComponentType::Gpu => "GPU",
            ComponentType::Motherboard => "Motherboard",
            ComponentType::Ram => "RAM",
            ComponentType::Storage => "Storage",
            ComponentType::Psu => "PSU",
            ComponentType::PcCase => "PCCase",
            ComponentType::CpuCooler => "CPUCooler",
            ComponentType::CaseFan => "CaseFan",
            ComponentType::Unknown => "Unknown",
        }
    }

    /// Clamp range for this type's price. `Unknown` has a fixed price and
    /// no range.
    pub fn bounds(&self) -> Option<PriceBounds> {
        let (min, max) = match self {
            ComponentType::Cpu => (150.0, 3500.0),
            ComponentType::Gpu => (250.0, 9000.0),
            ComponentType::Motherboard => (200.0, 1500.0),
            ComponentType::Ram => (60.0, 600.0),
            ComponentType::Storage => (50.0, 1000.0),
            ComponentType::Psu => (150.0, 800.0),
            ComponentType::PcCase => (120.0, 500.0),
            ComponentType::CpuCooler => (80.0, 600.0),
            ComponentType::CaseFan => (15.0, 200.0),
            ComponentType::Unknown => return None,
        };
        Some(PriceBounds { min, max })
    }

    pub fn is_known(&self) -> bool {
        *self != ComponentType::Unknown
    }
}

impl From<&str> for ComponentType {
    fn from(tag: &str) -> Self {
        ComponentType::parse(tag)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_roundtrip() {
        for kind in ComponentType::KNOWN {
            assert_eq!(ComponentType::parse(kind.as_str()), kind);
            assert!(kind.is_known());
            assert!(kind.bounds().is_some());
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(ComponentType::parse("cpu"), ComponentType::Unknown);
        assert_eq!(ComponentType::parse("Cpu"), ComponentType::Unknown);
        assert_eq!(ComponentType::parse(" CPU"), ComponentType::Unknown);
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(ComponentType::from("UnknownThing"), ComponentType::Unknown);
        assert_eq!(ComponentType::from(""), ComponentType::Unknown);
        assert!(ComponentType::Unknown.bounds().is_none());
    }

    #[test]
    fn test_serialize_uses_wire_tag() {
        let json = serde_json::to_string(&ComponentType::CpuCooler).unwrap();
        assert_eq!(json, "\"CPUCooler\"");
    }
}
