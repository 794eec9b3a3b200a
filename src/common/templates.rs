//! Templates embedded at compile time.

/// Get the default configuration file template.
pub fn get_config_template() -> &'static str {
    include_str!("../../templates/repository_locations.yml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::filesystem::config_store::ConfigStore;

    #[test]
    fn test_get_config_template() {
        let template = get_config_template();
        assert!(template.contains("gits configuration file template"));
        assert!(template.contains("repositories:"));
        assert!(template.contains("root_dir:"));
    }

    #[test]
    fn test_template_parses_as_configuration() {
        let groups = ConfigStore::parse_str(get_config_template(), None).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "tools");
        assert_eq!(groups[0].repositories.len(), 2);
    }
}
