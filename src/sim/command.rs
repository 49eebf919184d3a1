//! Commands fed to the simulation and the signal it returns.

use serde::{Deserialize, Serialize};

use super::collision::Collision;

/// Everything a driver can ask of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Begin a fresh run (valid in any phase)
    Start,
    /// Flap; ignored unless a run is in progress
    Jump,
    /// Advance one frame
    Tick,
}

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Run in progress, keep stepping
    Continue,
    /// The run ended this tick
    Ended(Collision),
    /// No run in progress (Idle or already Ended); nothing changed
    Inactive,
}

impl TickOutcome {
    /// Whether the driver should keep stepping
    pub fn is_running(&self) -> bool {
        matches!(self, TickOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_use_type_tag() {
        let json = serde_json::to_string(&Command::Jump).unwrap();
        assert_eq!(json, r#"{"type":"Jump"}"#);

        let script = r#"[{"type":"Start"},{"type":"Tick"},{"type":"Jump"}]"#;
        let commands: Vec<Command> = serde_json::from_str(script).unwrap();
        assert_eq!(commands, vec![Command::Start, Command::Tick, Command::Jump]);

        assert!(serde_json::from_str::<Command>(r#"{"type":"Fly"}"#).is_err());
    }

    #[test]
    fn test_outcome_json_carries_collision() {
        let outcome = TickOutcome::Ended(Collision::Pipe { id: 3 });
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"Ended":{"Pipe":{"id":3}}}"#);
        assert_eq!(serde_json::from_str::<TickOutcome>(&json).unwrap(), outcome);

        let json = serde_json::to_string(&TickOutcome::Inactive).unwrap();
        assert_eq!(json, r#""Inactive""#);
    }
}
