use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// One-time startup configuration handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Archive whose classes define the provenance annotation type. The host
    /// makes it loadable; the scanner only needs to know it was supplied.
    pub annotation_jar: PathBuf,
}

impl AgentConfig {
    /// Reads the agent option string. The whole string, trimmed, is the jar
    /// path.
    ///
    /// # Errors
    ///
    /// A missing or blank option string is rejected.
    pub fn from_agent_options(options: Option<&str>) -> Result<Self, ConfigError> {
        match options.map(str::trim) {
            Some(path) if !path.is_empty() => Ok(Self {
                annotation_jar: PathBuf::from(path),
            }),
            _ => Err(ConfigError::MissingAnnotationJar),
        }
    }

    #[must_use]
    pub fn annotation_jar(&self) -> &Path {
        &self.annotation_jar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_taken_verbatim() {
        let cfg = AgentConfig::from_agent_options(Some(" /opt/classport/commons.jar ")).unwrap();
        assert_eq!(cfg.annotation_jar(), Path::new("/opt/classport/commons.jar"));
    }

    #[test]
    fn missing_or_blank_fails_closed() {
        assert_eq!(
            AgentConfig::from_agent_options(None),
            Err(ConfigError::MissingAnnotationJar)
        );
        assert_eq!(
            AgentConfig::from_agent_options(Some("   ")),
            Err(ConfigError::MissingAnnotationJar)
        );
    }
}
