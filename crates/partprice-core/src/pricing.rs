//! Per-type price calculator.
//!
//! Each [`ComponentType`] has a linear formula over a handful of attributes
//! read through [`crate::attrs`] with explicit defaults, so a record with no
//! recognized fields still prices at the type's defaults. The result is
//! clamped to the type's [`PriceBounds`] and then rounded to cents.
//!
//! | Type | Formula | Range |
//! |------|---------|-------|
//! | CPU | 100 + cores·40 + perf·20 + (boost−3.0)·80 | 150–3500 |
//! | GPU | 150 + vram·60 + bus·0.4 (+3000 flagship) | 250–9000 |
//! | Motherboard | 150 + slots·30 + m2·60 + pcie·20 (+150 wifi) | 200–1500 |
//! | RAM | 40 + qty·cap·6 + (speed−2400)·0.02 | 60–600 |
//! | Storage | 30 + capacity·per_gb | 50–1000 |
//! | PSU | 120 + watts·0.3 (+80 full modular) | 150–800 |
//! | PCCase | 100 + volume·2 (+60 glass) | 120–500 |
//! | CPUCooler | water: 200 + rad·0.7, air: 60 + height·0.6 | 80–600 |
//! | CaseFan | size·0.25·qty | 15–200 |
//! | anything else | 150 | — |

use serde_json::Value;

use crate::attrs::{flag, number, seq_len, text};
use crate::component::ComponentType;

/// Price for tags without a formula.
pub const UNKNOWN_PRICE: f64 = 150.0;

/// Chipset substrings that mark a flagship GPU.
const FLAGSHIP_GPUS: [&str; 4] = ["4090", "4080", "7900 XTX", "7900 XT"];
const FLAGSHIP_PREMIUM: f64 = 3000.0;

/// Inclusive price range for one component type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl PriceBounds {
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Price a component given its raw type tag. Unrecognized tags price at
/// [`UNKNOWN_PRICE`].
pub fn price(component_type: &str, record: &Value) -> f64 {
    price_for(ComponentType::parse(component_type), record)
}

/// Price a component with an already-parsed type.
pub fn price_for(kind: ComponentType, record: &Value) -> f64 {
    match kind.bounds() {
        Some(bounds) => round_cents(bounds.clamp(raw_price(kind, record))),
        None => UNKNOWN_PRICE,
    }
}

/// Round half away from zero to two fraction digits.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unclamped, unrounded formula value.
fn raw_price(kind: ComponentType, record: &Value) -> f64 {
    match kind {
        ComponentType::Cpu => {
            let cores = number(record, "cores.total", 4.0);
            let performance = number(record, "cores.performance", cores);
            let boost = number(record, "clocks.performance.boost", 3.0);
            100.0 + cores * 40.0 + performance * 20.0 + (boost - 3.0) * 80.0
        }
        ComponentType::Gpu => {
            let vram = number(record, "memory", 4.0);
            let bus = number(record, "memory_bus", 128.0);
            let chipset = text(record, "chipset", "");
            let premium = if FLAGSHIP_GPUS.iter().any(|m| chipset.contains(m)) {
                FLAGSHIP_PREMIUM
            } else {
                0.0
            };
            150.0 + vram * 60.0 + bus * 0.4 + premium
        }
        ComponentType::Motherboard => {
            let slots = number(record, "memory.slots", 2.0);
            let m2 = seq_len(record, "m2_slots") as f64;
            let pcie = seq_len(record, "pcie_slots") as f64;
            let wifi = if flag(record, "wireless_networking", false) {
                150.0
            } else {
                0.0
            };
            150.0 + slots * 30.0 + m2 * 60.0 + pcie * 20.0 + wifi
        }
        ComponentType::Ram => {
            let quantity = number(record, "modules.quantity", 1.0);
            let capacity = number(record, "modules.capacity_gb", 8.0);
            let speed = number(record, "speed", 3200.0);
            40.0 + (quantity * capacity) * 6.0 + (speed - 2400.0) * 0.02
        }
        ComponentType::Storage => {
            let capacity = number(record, "capacity", 500.0);
            let per_gb = if flag(record, "nvme", false) {
                0.22
            } else if text(record, "type", "HDD").contains("SSD") {
                0.18
            } else {
                0.10
            };
            30.0 + capacity * per_gb
        }
        ComponentType::Psu => {
            let watts = number(record, "wattage", 500.0);
            let modular = if text(record, "modular", "").contains("Full") {
                80.0
            } else {
                0.0
            };
            120.0 + watts * 0.3 + modular
        }
        ComponentType::PcCase => {
            let volume = number(record, "volume", 40.0);
            let glass = if flag(record, "has_transparent_side_panel", false) {
                60.0
            } else {
                0.0
            };
            100.0 + volume * 2.0 + glass
        }
        ComponentType::CpuCooler => {
            if flag(record, "water_cooled", false) {
                200.0 + number(record, "radiator_size", 240.0) * 0.7
            } else {
                60.0 + number(record, "height", 150.0) * 0.6
            }
        }
        ComponentType::CaseFan => {
            let size = number(record, "size", 120.0);
            let quantity = number(record, "quantity", 1.0);
            (size * 0.25) * quantity
        }
        ComponentType::Unknown => UNKNOWN_PRICE,
    }
}
