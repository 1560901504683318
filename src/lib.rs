mod commands;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod fs_utils;
pub mod hooks;
pub mod models;
pub mod toolkit;
pub mod tools;

pub use config::{load_settings_from, GeminiSettings, NotifierConfig, OutputSettings, ToolkitSettings};
pub use credentials::{CredentialProvider, EnvCredentials, StaticCredentials};
pub use error::ToolkitError;
pub use hooks::{Announcer, CommandAnnouncer, HookEvent, IdleNotifier};
pub use models::{ImageConfig, Mode, OutputKind, ParsedImage};
pub use toolkit::ImageToolkit;
pub use tools::{image_tool_registry, AnalyzeTool, EditTool, GenerateTool, Tool, ToolRegistry};
