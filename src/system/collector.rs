use std::future::Future;
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Command;

/// External data source for one sampler: produces the raw text the sampler
/// parses. Implementations must not block the runtime.
pub trait Collect: Send {
    fn collect(&mut self) -> impl Future<Output = Result<String, CollectorError>> + Send;
}

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}")]
    Exit {
        command: &'static str,
        status: ExitStatus,
    },
    #[error("{command} produced non-utf8 output")]
    Encoding { command: &'static str },
}

/// Runs a fixed OS utility and captures its stdout. A nonzero exit status is
/// a hard failure for the tick that asked for it.
pub struct CommandCollector {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandCollector {
    /// The verbose process table, quoted CSV, one row per process.
    pub fn tasklist() -> Self {
        Self {
            program: "tasklist",
            args: &["/fo", "CSV", "/v"],
        }
    }

    /// Processor records in `key=value` list format.
    pub fn cpu() -> Self {
        Self {
            program: "wmic",
            args: &["cpu", "list", "full", "/format:list"],
        }
    }

    /// Physical memory records in `key=value` list format.
    pub fn physical_memory() -> Self {
        Self {
            program: "wmic",
            args: &["memphysical", "list", "full", "/format:list"],
        }
    }
}

impl Collect for CommandCollector {
    async fn collect(&mut self) -> Result<String, CollectorError> {
        let output = Command::new(self.program)
            .args(self.args)
            .output()
            .await
            .map_err(|source| CollectorError::Spawn {
                command: self.program,
                source,
            })?;
        if !output.status.success() {
            return Err(CollectorError::Exit {
                command: self.program,
                status: output.status,
            });
        }
        String::from_utf8(output.stdout).map_err(|_| CollectorError::Encoding {
            command: self.program,
        })
    }
}

/// Scans `key=value` list output for the first key containing `key_fragment`
/// and returns its trimmed value.
pub fn list_value<'a>(output: &'a str, key_fragment: &str) -> Option<&'a str> {
    output.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        key.contains(key_fragment).then(|| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_value_matches_key_fragment() {
        let output = "Architecture=9\r\nLoadPercentage=37\r\nManufacturer=GenuineIntel\r\n";
        assert_eq!(list_value(output, "LoadPercentage"), Some("37"));
        assert_eq!(list_value(output, "Manufacturer"), Some("GenuineIntel"));
    }

    #[test]
    fn list_value_missing_key_is_none() {
        let output = "Architecture=9\nManufacturer=GenuineIntel\n";
        assert_eq!(list_value(output, "LoadPercentage"), None);
    }

    #[test]
    fn list_value_ignores_lines_without_separator() {
        let output = "no separator here\nMaxCapacity=16777216\n";
        assert_eq!(list_value(output, "MaxCapacity"), Some("16777216"));
    }
}
