//! Read-more gate: whether a log-in prompt follows a preview.

use serde::{Deserialize, Serialize};

/// Deployment switch for the log-in prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSettings {
    pub show_login_prompt: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            show_login_prompt: true,
        }
    }
}

pub fn should_show_gate(
    was_truncated: bool,
    is_authenticated: bool,
    show_login_prompt: bool,
) -> bool {
    show_login_prompt && !is_authenticated && was_truncated
}
