use crate::config::FilterConfig;
use std::ffi::OsStr;

pub struct FileFilter {
    file_extension: String,
}

impl FileFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            file_extension: config.file_extension.clone(),
        }
    }

    /// Plain suffix match against the file's base name. Byte-wise and
    /// case-sensitive: not a glob, and `a.LOG` does not match `.log`.
    pub fn matches_file_name(&self, file_name: &OsStr) -> bool {
        file_name
            .as_encoded_bytes()
            .ends_with(self.file_extension.as_bytes())
    }

    pub fn get_extension(&self) -> &str {
        &self.file_extension
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        let config = FilterConfig::default();
        Self::new(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_for(extension: &str) -> FileFilter {
        FileFilter::new(&FilterConfig {
            file_extension: extension.to_string(),
            follow_symlinks: false,
        })
    }

    #[test]
    fn test_suffix_match() {
        let filter = filter_for(".log");

        assert!(filter.matches_file_name(OsStr::new("app.log")));
        assert!(filter.matches_file_name(OsStr::new("a.log")));
        assert!(!filter.matches_file_name(OsStr::new("a.txt")));
        assert!(!filter.matches_file_name(OsStr::new("applog")));
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        let filter = filter_for(".log");

        assert!(!filter.matches_file_name(OsStr::new("app.LOG")));
        assert!(!filter.matches_file_name(OsStr::new("APP.Log")));
    }

    #[test]
    fn test_suffix_is_not_an_extension_parse() {
        // The filter is a raw suffix, so a dotless value matches any name
        // ending in it.
        let filter = filter_for("log");

        assert!(filter.matches_file_name(OsStr::new("app.log")));
        assert!(filter.matches_file_name(OsStr::new("catalog")));
    }

    #[test]
    fn test_multi_component_suffix() {
        let filter = filter_for(".tar.log");

        assert!(filter.matches_file_name(OsStr::new("archive.tar.log")));
        assert!(!filter.matches_file_name(OsStr::new("archive.log")));
    }

    #[test]
    fn test_default_filter_uses_log_extension() {
        let filter = FileFilter::default();
        assert_eq!(filter.get_extension(), ".log");
    }
}
