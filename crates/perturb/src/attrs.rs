//! Attribute bookkeeping for anomaly and perturbed output files.

use std::collections::BTreeMap;

use chrono::Utc;

/// Scenario metadata stamped into output file attributes.
#[derive(Debug, Clone)]
pub struct ScenarioMeta {
    /// Climate model name, e.g. `"HadCM3"` or `"IPSL-CM6A-LR"`.
    pub model: String,
    /// Scenario name, e.g. `"A1B"` or `"ssp585-historical"`.
    pub scenario: String,
    /// First year of the reference period.
    pub reference_start: i32,
    /// End year of the reference period (exclusive).
    pub reference_end: i32,
    /// First year of the target period.
    pub target_start: i32,
    /// End year of the target period (exclusive).
    pub target_end: i32,
    /// Contact string for the produced files.
    pub contact: String,
}

impl ScenarioMeta {
    /// The file-name extension encoding both periods, e.g.
    /// `"21602200-19792019"`.
    pub fn period_ext(&self) -> String {
        format!(
            "{}{}-{}{}",
            self.target_start, self.target_end, self.reference_start, self.reference_end
        )
    }
}

/// Rewrites a variable attribute map for a derived anomaly variable.
///
/// Per-file `time` and `date` attributes make no sense on a derived field
/// and are dropped; `name`, `title`, and `long_name` are replaced with the
/// anomaly's own identity.
pub fn anomaly_var_attrs(
    template: &BTreeMap<String, String>,
    name: &str,
    long_name: &str,
) -> BTreeMap<String, String> {
    let mut attrs = template.clone();
    attrs.remove("time");
    attrs.remove("date");
    attrs.insert("name".to_string(), name.to_string());
    attrs.insert("title".to_string(), long_name.to_string());
    attrs.insert("long_name".to_string(), long_name.to_string());
    attrs
}

/// Builds the global attributes of an anomaly file.
pub fn anomaly_global_attrs(meta: &ScenarioMeta, method: &str) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    attrs.insert(
        "Description".to_string(),
        "Anomaly between a specific period and a reference period".to_string(),
    );
    attrs.insert(
        "Specific Period".to_string(),
        format!("{} - {}", meta.target_start, meta.target_end),
    );
    attrs.insert(
        "Reference Period".to_string(),
        format!("{} - {}", meta.reference_start, meta.reference_end),
    );
    attrs.insert("Method".to_string(), method.to_string());
    attrs.insert("Model".to_string(), meta.model.clone());
    attrs.insert("Scenario".to_string(), meta.scenario.clone());
    attrs.insert("Contact".to_string(), meta.contact.clone());
    attrs.insert("Creation date".to_string(), Utc::now().to_rfc3339());
    attrs
}

/// Builds the global attribute updates of a perturbed reanalysis file.
///
/// Returned entries are merged over the attributes inherited from the
/// reanalysis input.
pub fn perturbed_global_attrs(
    meta: &ScenarioMeta,
    anomaly_file: &str,
) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    attrs.insert(
        "Description".to_string(),
        format!(
            "Reanalysis data plus {} {} {} anomaly ({})",
            meta.model,
            meta.scenario,
            meta.period_ext(),
            anomaly_file,
        ),
    );
    attrs.insert("Contact".to_string(), meta.contact.clone());
    attrs.insert("Creation date".to_string(), Utc::now().to_rfc3339());
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ScenarioMeta {
        ScenarioMeta {
            model: "HadCM3".to_string(),
            scenario: "A1B".to_string(),
            reference_start: 1979,
            reference_end: 2019,
            target_start: 2160,
            target_end: 2200,
            contact: "nobody@example.org".to_string(),
        }
    }

    #[test]
    fn period_ext_format() {
        assert_eq!(meta().period_ext(), "21602200-19792019");
    }

    #[test]
    fn var_attrs_drop_per_file_entries() {
        let mut template = BTreeMap::new();
        template.insert("time".to_string(), "2019-01-01".to_string());
        template.insert("date".to_string(), "20190101".to_string());
        template.insert("units".to_string(), "kg/m2/s".to_string());

        let attrs = anomaly_var_attrs(&template, "dsnow", "snowfall rate anomaly");
        assert!(!attrs.contains_key("time"));
        assert!(!attrs.contains_key("date"));
        assert_eq!(attrs.get("units").map(String::as_str), Some("kg/m2/s"));
        assert_eq!(attrs.get("name").map(String::as_str), Some("dsnow"));
        assert_eq!(
            attrs.get("long_name").map(String::as_str),
            Some("snowfall rate anomaly")
        );
        assert_eq!(
            attrs.get("title").map(String::as_str),
            Some("snowfall rate anomaly")
        );
    }

    #[test]
    fn global_attrs_carry_periods() {
        let attrs = anomaly_global_attrs(&meta(), "snow_ano = precip_ano * ratio");
        assert_eq!(
            attrs.get("Specific Period").map(String::as_str),
            Some("2160 - 2200")
        );
        assert_eq!(
            attrs.get("Reference Period").map(String::as_str),
            Some("1979 - 2019")
        );
        assert_eq!(attrs.get("Model").map(String::as_str), Some("HadCM3"));
        assert_eq!(attrs.get("Scenario").map(String::as_str), Some("A1B"));
        assert!(attrs.contains_key("Creation date"));
    }

    #[test]
    fn perturbed_attrs_mention_anomaly_file() {
        let attrs = perturbed_global_attrs(&meta(), "A1B_SNOW_3h_ano.nc");
        let desc = attrs.get("Description").unwrap();
        assert!(desc.contains("HadCM3"));
        assert!(desc.contains("A1B_SNOW_3h_ano.nc"));
        assert!(desc.contains("21602200-19792019"));
    }
}
