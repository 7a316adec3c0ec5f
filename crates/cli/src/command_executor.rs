//! Process spawning behind a trait so backends can be driven without `az`

use async_trait::async_trait;
use std::process::{Output, Stdio};
use vaultenv_core::types::CommandArguments;
use vaultenv_core::{Error, Result};

/// Runs an external program to completion and captures its output
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `cmd` with `args`; a nonzero exit is returned as `Ok`
    async fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output>;
}

/// Spawns real processes with stdin closed
///
/// Stateless; one instance can serve any number of concurrent fetches.
#[derive(Debug, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output> {
        let mut command = tokio::process::Command::new(cmd);
        command
            .args(args.as_slice())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        command.output().await.map_err(|e| {
            Error::command_execution(
                cmd,
                args.as_slice().to_vec(),
                format!("could not start process: {e}"),
                None,
            )
        })
    }
}

#[cfg(test)]
pub use scripted::ScriptedExecutor;

/// Canned process replies keyed by exact invocation
#[cfg(test)]
mod scripted {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    type Invocation = (String, Vec<String>);

    struct Reply {
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        code: i32,
    }

    #[derive(Default)]
    pub struct ScriptedExecutor {
        replies: Mutex<HashMap<Invocation, Reply>>,
        calls: AtomicUsize,
    }

    impl ScriptedExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        fn script(&self, cmd: &str, args: &[&str], reply: Reply) {
            let invocation = (
                cmd.to_string(),
                args.iter().map(|a| (*a).to_string()).collect(),
            );
            if let Ok(mut replies) = self.replies.lock() {
                replies.insert(invocation, reply);
            }
        }

        /// Exit 0 printing `stdout`
        pub fn succeed_with(&self, cmd: &str, args: &[&str], stdout: &str) {
            self.script(
                cmd,
                args,
                Reply {
                    stdout: stdout.as_bytes().to_vec(),
                    stderr: Vec::new(),
                    code: 0,
                },
            );
        }

        /// Exit 1 printing `stderr`
        pub fn fail_with(&self, cmd: &str, args: &[&str], stderr: &str) {
            self.script(
                cmd,
                args,
                Reply {
                    stdout: Vec::new(),
                    stderr: stderr.as_bytes().to_vec(),
                    code: 1,
                },
            );
        }

        /// Number of invocations seen, scripted or not
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CommandExecutor for ScriptedExecutor {
        async fn execute(&self, cmd: &str, args: &CommandArguments) -> Result<Output> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let invocation = (cmd.to_string(), args.as_slice().to_vec());
            let replies = self
                .replies
                .lock()
                .map_err(|e| Error::configuration(format!("scripted replies poisoned: {e}")))?;

            let reply = replies.get(&invocation).ok_or_else(|| {
                Error::command_execution(
                    cmd,
                    args.as_slice().to_vec(),
                    "no scripted reply for this invocation",
                    None,
                )
            })?;
            Ok(Output {
                status: exit_status(reply.code),
                stdout: reply.stdout.clone(),
                stderr: reply.stderr.clone(),
            })
        }
    }

    #[cfg(unix)]
    fn exit_status(code: i32) -> std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        // Wait status keeps the exit code in the second byte
        std::process::ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    fn exit_status(code: i32) -> std::process::ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code as u32)
    }
}
