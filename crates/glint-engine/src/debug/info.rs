/// A single name/value line of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// A named object (or topic) with ordered properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoUnit {
    pub name: String,
    pub properties: Vec<Property>,
}

impl InfoUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn add_property(&mut self, name: impl Into<String>, value: impl ToString) {
        self.properties.push(Property {
            name: name.into(),
            value: value.to_string(),
        });
    }

    /// Value of the first property called `name`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// A report section holding units in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoGroup {
    pub name: String,
    pub units: Vec<InfoUnit>,
}

impl InfoGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: Vec::new(),
        }
    }

    pub fn add_info_unit(&mut self, unit: InfoUnit) {
        self.units.push(unit);
    }

    pub fn unit(&self, name: &str) -> Option<&InfoUnit> {
        self.units.iter().find(|u| u.name == name)
    }
}
