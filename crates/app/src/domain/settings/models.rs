//! Settings models.

use serde::{Deserialize, Serialize};

/// Stored cleanup configuration. A scan request may override any field;
/// absent overrides fall back to these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupSettings {
    /// Classify by authored-post count.
    pub check_posts: bool,

    /// Classify by order existence.
    pub check_orders: bool,

    /// Roles never scanned.
    pub exclude_roles: Vec<String>,

    /// Comma-separated email domains whose users are never reported
    /// inactive (marketplace relay addresses, trusted webmail, ...).
    pub excluded_domains: String,
}

impl Default for CleanupSettings {
    fn default() -> Self {
        Self {
            check_posts: false,
            check_orders: false,
            exclude_roles: vec![
                "administrator".to_string(),
                "editor".to_string(),
                "author".to_string(),
            ],
            excluded_domains: "members.ebay.com,kogan.com.au,members.ebay.com.au,\
                               amazon.com.au,gmail.com,yahoo.com,hotmail.com,outlook.com"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excluded_domains_have_no_whitespace() {
        let settings = CleanupSettings::default();

        assert!(!settings.excluded_domains.contains(char::is_whitespace));
        assert!(settings.excluded_domains.contains("members.ebay.com.au"));
    }

    #[test]
    fn default_exclude_roles_cover_privileged_roles() {
        let settings = CleanupSettings::default();

        for role in ["administrator", "editor", "author"] {
            assert!(
                settings.exclude_roles.iter().any(|r| r == role),
                "default exclude_roles should contain {role}"
            );
        }
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = CleanupSettings {
            check_posts: true,
            ..CleanupSettings::default()
        };

        let json = serde_json::to_value(&settings).unwrap();
        let restored: CleanupSettings = serde_json::from_value(json).unwrap();

        assert_eq!(restored, settings);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let restored: CleanupSettings = serde_json::from_str("{\"check_posts\": true}").unwrap();

        assert!(restored.check_posts);
        assert_eq!(restored.exclude_roles, CleanupSettings::default().exclude_roles);
    }
}
