// Session module - the editable form and what the last run produced

pub mod format;
pub mod state;

pub use format::infer_class_name;
pub use state::{ExecutionOutcome, Session};

use std::str::FromStr;

/// Which renderings of the output to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Both,
    Raw,
    ToString,
}

impl OutputFormat {
    pub fn shows_raw(self) -> bool {
        matches!(self, OutputFormat::Both | OutputFormat::Raw)
    }

    pub fn shows_to_string(self) -> bool {
        matches!(self, OutputFormat::Both | OutputFormat::ToString)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Both => "both",
            OutputFormat::Raw => "raw",
            OutputFormat::ToString => "tostring",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(OutputFormat::Both),
            "raw" => Ok(OutputFormat::Raw),
            "tostring" | "to-string" | "to_string" => Ok(OutputFormat::ToString),
            other => Err(format!(
                "unknown output format '{}', expected both, raw or tostring",
                other
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
