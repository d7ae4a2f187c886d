use serde::{Deserialize, Serialize};

/// Visibility of the "upgrade in progress" overlay
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverlayGuard {
    visible: bool,
    shown: u32,
}

impl OverlayGuard {
    /// Request a visibility. Returns whether anything changed; repeated
    /// requests for the current state do nothing.
    pub fn set(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        if visible {
            self.shown += 1;
        }
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of hidden to visible transitions so far
    pub fn shown_count(&self) -> u32 {
        self.shown
    }
}

/// Phase of the firmware upgrade workflow
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UpgradePhase {
    #[default]
    Idle,
    /// Request sent, no progress reported yet
    Submitting,
    Busy,
    /// Result received, overlay clear scheduled under `generation`
    Cooldown { generation: u32 },
}

/// The single upgrade session of a page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpgradeSession {
    phase: UpgradePhase,
    progress_percent: u8,
    status_line: String,
    overlay: OverlayGuard,
    generation: u32,
}

impl UpgradeSession {
    pub fn phase(&self) -> UpgradePhase {
        self.phase
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    pub fn overlay(&self) -> &OverlayGuard {
        &self.overlay
    }

    pub fn is_busy(&self) -> bool {
        self.overlay.is_visible()
    }

    /// Show or hide the overlay; returns whether anything changed
    pub fn set_overlay(&mut self, visible: bool) -> bool {
        self.overlay.set(visible)
    }

    /// Start an upgrade. Returns the generation of a pending overlay clear
    /// that this submission pre-empts, if any.
    pub fn begin(&mut self, waiting_message: &str) -> Option<u32> {
        let pre_empted = match self.phase {
            UpgradePhase::Cooldown { generation } => Some(generation),
            _ => None,
        };
        self.phase = UpgradePhase::Submitting;
        self.progress_percent = 0;
        self.status_line = waiting_message.to_string();
        self.set_overlay(true);
        pre_empted
    }

    /// Progress reported by the device, in percent
    pub fn record_progress(&mut self, percent: u8) {
        self.progress_percent = percent.min(100);
        self.set_overlay(true);
        // A late progress update does not cancel a scheduled clear
        if matches!(self.phase, UpgradePhase::Idle | UpgradePhase::Submitting) {
            self.phase = UpgradePhase::Busy;
        }
    }

    /// Terminal result reported. Returns the generation the overlay clear must
    /// be scheduled under.
    pub fn record_result(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.phase = UpgradePhase::Cooldown {
            generation: self.generation,
        };
        self.generation
    }

    /// Replace the status line with the fragments of one message
    pub fn set_status(&mut self, fragments: &[String]) {
        self.status_line = fragments.join(", ");
    }

    /// Scheduled overlay clear fired. Only the clear of the current cooldown
    /// has an effect; returns whether the session went idle.
    pub fn clear_overlay(&mut self, generation: u32) -> bool {
        if self.phase != (UpgradePhase::Cooldown { generation }) {
            return false;
        }
        self.phase = UpgradePhase::Idle;
        self.set_overlay(false);
        true
    }

    /// Upgrade request failed before the device took over
    pub fn abort(&mut self, status: impl Into<String>) {
        self.phase = UpgradePhase::Idle;
        self.status_line = status.into();
        self.set_overlay(false);
    }
}
