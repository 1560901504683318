use std::path::PathBuf;

use crate::constants::{EDITS_DIR_NAME, GENERATIONS_DIR_NAME};

/// Per-call output options supplied by the tool caller.
#[derive(Debug, Clone, Default)]
pub struct ImageConfig {
    pub output_dir: Option<PathBuf>,
    pub custom_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImage {
    pub mime: String,
    pub base64: String,
}

/// Whether an operation talks to the API or only reports what it would do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Live,
    Mock,
}

impl Mode {
    pub fn is_mock(self) -> bool {
        matches!(self, Mode::Mock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Generation,
    Edit,
}

impl OutputKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            OutputKind::Generation => GENERATIONS_DIR_NAME,
            OutputKind::Edit => EDITS_DIR_NAME,
        }
    }

    pub fn is_edit(self) -> bool {
        matches!(self, OutputKind::Edit)
    }
}
