use serde::{Deserialize, Serialize};

use super::record::TelemetryRecord;

/// Optional allow-lists over the categorical dimensions.
///
/// An empty list means "no restriction on that dimension", never
/// "exclude everything".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub services: Vec<String>,
    pub endpoints: Vec<String>,
    pub regions: Vec<String>,
}

impl FilterCriteria {
    pub fn is_unrestricted(&self) -> bool {
        self.services.is_empty() && self.endpoints.is_empty() && self.regions.is_empty()
    }

    pub fn matches(&self, record: &TelemetryRecord) -> bool {
        dimension_matches(&self.services, &record.service_name)
            && dimension_matches(&self.endpoints, &record.endpoint)
            && dimension_matches(&self.regions, &record.region)
    }
}

fn dimension_matches(allow_list: &[String], value: &str) -> bool {
    allow_list.is_empty() || allow_list.iter().any(|v| v == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(service: &str, endpoint: &str, region: &str) -> TelemetryRecord {
        TelemetryRecord::new(None, service, endpoint, region, "200")
    }

    #[test]
    fn empty_criteria_match_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unrestricted());
        assert!(criteria.matches(&record("auth", "/login", "eu-west-1")));
    }

    #[test]
    fn dimensions_intersect() {
        let criteria = FilterCriteria {
            services: vec!["auth".into()],
            endpoints: vec![],
            regions: vec!["us-east-1".into()],
        };
        assert!(criteria.matches(&record("auth", "/login", "us-east-1")));
        assert!(!criteria.matches(&record("auth", "/login", "eu-west-1")));
        assert!(!criteria.matches(&record("billing", "/charge", "us-east-1")));
    }
}
