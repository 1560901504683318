//! Spoken announcement when a session goes idle.

use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::{debug, warn};

use super::events::{HookEvent, SESSION_IDLE};
use crate::config::NotifierConfig;

/// Side effect run when a session goes idle.
pub trait Announcer: Send + Sync {
    fn announce(&self, phrase: &str);
}

/// Runs `<program> <phrase>` in the background (macOS `say` by default).
/// Spawn failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct CommandAnnouncer {
    program: String,
}

impl CommandAnnouncer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Announcer for CommandAnnouncer {
    fn announce(&self, phrase: &str) {
        let spawned = Command::new(&self.program)
            .arg(phrase)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                // Reap in the background so the caller never waits.
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(err) => warn!(program = %self.program, error = %err, "announcement failed"),
        }
    }
}

pub struct IdleNotifier {
    config: NotifierConfig,
    announcer: Arc<dyn Announcer>,
}

impl IdleNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        let announcer = Arc::new(CommandAnnouncer::new(config.program.clone()));
        Self { config, announcer }
    }

    pub fn with_announcer(config: NotifierConfig, announcer: Arc<dyn Announcer>) -> Self {
        Self { config, announcer }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Event types this hook subscribes to; none while disabled.
    pub fn event_types(&self) -> &'static [&'static str] {
        if self.config.enabled {
            &[SESSION_IDLE]
        } else {
            &[]
        }
    }

    /// Announce once for a `session.idle` event when enabled.
    pub fn on_event(&self, event: &HookEvent) {
        if !self.config.enabled || !event.is_session_idle() {
            return;
        }
        debug!(phrase = %self.config.phrase, "session idle, announcing");
        self.announcer.announce(&self.config.phrase);
    }
}
