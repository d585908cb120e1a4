/// Static capability strings reported by a driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverSummary {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub backend: String,
    pub device_type: String,

    /// Optional capabilities the driver exposes, by name.
    pub extensions: Vec<String>,

    pub limits: Vec<LimitFamily>,
}

/// A named set of related driver limits, already formatted for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LimitFamily {
    pub name: String,
    pub limits: Vec<(String, String)>,
}

impl LimitFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limits: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.limits.push((name.into(), value.to_string()));
        self
    }
}

/// Read-only access to driver capability information.
pub trait DriverInfo {
    /// Returns `None` when no native context is alive to query.
    fn driver_summary(&self) -> Option<DriverSummary>;
}

/// Maps a PCI vendor id to a display name.
pub fn vendor_name(id: u32) -> Option<&'static str> {
    match id {
        0x1002 => Some("AMD"),
        0x106b => Some("Apple"),
        0x10de => Some("NVIDIA"),
        0x13b5 => Some("ARM"),
        0x5143 => Some("Qualcomm"),
        0x8086 => Some("Intel"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vendor_ids() {
        assert_eq!(vendor_name(0x10de), Some("NVIDIA"));
        assert_eq!(vendor_name(0x8086), Some("Intel"));
        assert_eq!(vendor_name(0x1002), Some("AMD"));
    }

    #[test]
    fn unknown_vendor_id() {
        assert_eq!(vendor_name(0), None);
        assert_eq!(vendor_name(0xffff), None);
    }

    #[test]
    fn limit_family_keeps_insertion_order() {
        let family = LimitFamily::new("Textures")
            .with("max 2d size", 8192)
            .with("max layers", 256);
        assert_eq!(family.limits[0], ("max 2d size".to_string(), "8192".to_string()));
        assert_eq!(family.limits[1].0, "max layers");
    }
}
