use async_trait::async_trait;
use tapguard_application::ports::ResolverControl;
use tapguard_domain::config::CloakConfig;
use tapguard_domain::{ActuatorCommand, DomainError};
use tokio::process::Command;
use tracing::debug;

/// Drives unbound through `unbound-control local_zone` /
/// `local_zone_remove`.
pub struct UnboundControl {
    program: String,
    args: Vec<String>,
    zone_type: String,
}

impl UnboundControl {
    pub fn new(program: impl Into<String>, args: Vec<String>, zone_type: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            zone_type: zone_type.into(),
        }
    }

    pub fn from_config(config: &CloakConfig) -> Self {
        Self::new(
            config.unbound_control.clone(),
            config.unbound_control_args.clone(),
            config.zone_type.clone(),
        )
    }

    /// Arguments passed to the control program for `command`.
    pub fn command_args(&self, command: &ActuatorCommand) -> Vec<String> {
        let mut args = self.args.clone();
        match command {
            ActuatorCommand::Block(domain) => {
                args.push("local_zone".to_string());
                args.push(domain.clone());
                args.push(self.zone_type.clone());
            }
            ActuatorCommand::Unblock(domain) => {
                args.push("local_zone_remove".to_string());
                args.push(domain.clone());
            }
        }
        args
    }
}

#[async_trait]
impl ResolverControl for UnboundControl {
    async fn execute(&self, command: &ActuatorCommand) -> Result<(), DomainError> {
        let args = self.command_args(command);
        debug!(program = %self.program, args = ?args, "Running resolver control");

        let output = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DomainError::Actuator(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() { stdout } else { stderr };
            return Err(DomainError::Actuator(format!(
                "{} {} exited with {}: {}",
                self.program,
                command,
                output.status,
                detail.trim()
            )));
        }

        Ok(())
    }
}
