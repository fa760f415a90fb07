//! Heuristic device-type inference from hostname text and manufacturer.
//!
//! Rules are evaluated in order and the first hit wins. Names match by
//! case-insensitive substring, manufacturers by case-insensitive equality.

use devscout_common::device::DeviceType;

#[derive(Debug, Clone)]
pub struct Rule {
    pub keywords: Vec<String>,
    pub manufacturers: Vec<String>,
    pub category: DeviceType,
}

impl Rule {
    pub fn new(keywords: &[&str], manufacturers: &[&str], category: DeviceType) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            manufacturers: manufacturers.iter().map(|m| m.to_string()).collect(),
            category,
        }
    }

    fn matches(&self, lowered_name: &str, manufacturer: &str) -> bool {
        self.keywords.iter().any(|k| lowered_name.contains(k.as_str()))
            || self
                .manufacturers
                .iter()
                .any(|m| m.eq_ignore_ascii_case(manufacturer))
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Category for a device. `name` is empty when it could not be resolved.
    pub fn classify(&self, name: &str, manufacturer: &str) -> DeviceType {
        let lowered = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered, manufacturer))
            .map(|rule| rule.category)
            .unwrap_or(DeviceType::Unknown)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        // Apple is absent from the phone vendors: a bare Apple OUI says
        // nothing about the form factor, and rule six maps it to a computer.
        Self::new(vec![
            Rule::new(
                &["iphone", "android", "mobile", "phone"],
                &["Samsung", "Google", "Xiaomi", "OnePlus", "Huawei"],
                DeviceType::Smartphone,
            ),
            Rule::new(
                &["echo", "alexa", "dot", "smart", "nest", "cam"],
                &["Amazon", "Philips", "Nest"],
                DeviceType::Iot,
            ),
            Rule::new(
                &["pc", "desktop", "laptop", "macbook", "imac"],
                &[],
                DeviceType::Computer,
            ),
            Rule::new(
                &["tv", "roku", "firetv", "appletv", "chromecast"],
                &[],
                DeviceType::Entertainment,
            ),
            Rule::new(&["pi"], &["Raspberry Pi"], DeviceType::Computer),
            Rule::new(&[], &["Apple"], DeviceType::Computer),
        ])
    }
}
