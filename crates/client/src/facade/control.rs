use protocol::command::{self, ProjectOp, ResultOp, TransferOp};
use protocol::{GlobalPreferences, Mode};

use super::RpcClient;
use crate::error::ClientError;

impl RpcClient {
    /// Applies `op` to the project at `project_url`.
    pub fn project_op(&self, op: ProjectOp, project_url: &str) -> Result<bool, ClientError> {
        self.command(&command::project_op(op, project_url))
    }

    /// Applies `op` to task `name`.
    pub fn result_op(&self, op: ResultOp, project_url: &str, name: &str) -> Result<bool, ClientError> {
        self.command(&command::result_op(op, project_url, name))
    }

    /// Applies `op` to the transfer of `filename`.
    pub fn transfer_op(
        &self,
        op: TransferOp,
        project_url: &str,
        filename: &str,
    ) -> Result<bool, ClientError> {
        self.command(&command::transfer_op(op, project_url, filename))
    }

    /// Sets the task run mode; a positive `duration` reverts after that many seconds.
    pub fn set_run_mode(&self, mode: Mode, duration: f64) -> Result<bool, ClientError> {
        self.command(&command::set_run_mode(mode, duration))
    }

    /// Sets the GPU mode.
    pub fn set_gpu_mode(&self, mode: Mode, duration: f64) -> Result<bool, ClientError> {
        self.command(&command::set_gpu_mode(mode, duration))
    }

    /// Sets the network mode.
    pub fn set_network_mode(&self, mode: Mode, duration: f64) -> Result<bool, ClientError> {
        self.command(&command::set_network_mode(mode, duration))
    }

    /// Starts the CPU benchmarks.
    pub fn run_benchmarks(&self) -> Result<bool, ClientError> {
        self.command(&command::run_benchmarks())
    }

    /// Tells the core client the network is available.
    pub fn network_available(&self) -> Result<bool, ClientError> {
        self.command(&command::network_available())
    }

    /// Asks the core client to exit.
    pub fn quit(&self) -> Result<bool, ClientError> {
        self.command(&command::quit())
    }

    /// Re-reads `cc_config.xml`.
    pub fn read_cc_config(&self) -> Result<bool, ClientError> {
        self.command(&command::read_cc_config())
    }

    /// Re-reads the preferences override file.
    pub fn read_global_prefs_override(&self) -> Result<bool, ClientError> {
        self.command(&command::read_global_prefs_override())
    }

    /// Replaces the preferences override file.
    ///
    /// The core client only applies the new file after
    /// [`read_global_prefs_override`](Self::read_global_prefs_override).
    pub fn set_global_prefs_override(&self, prefs: &GlobalPreferences) -> Result<bool, ClientError> {
        self.command(&command::set_global_prefs_override(prefs))
    }
}
