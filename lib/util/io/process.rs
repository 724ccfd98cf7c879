use super::{Io, Pipe};
use async_trait::async_trait;
use std::{io, process::Stdio};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::instrument;

/// An [`Io`] channel to the standard streams of a child process.
///
/// The child process is killed when this is dropped.
#[derive(Debug)]
pub struct Process {
    pipe: Pipe<ChildStdin, ChildStdout>,
    #[allow(dead_code)]
    child: Child,
}

impl Process {
    /// Spawns a child process.
    #[instrument(level = "trace", err)]
    pub fn spawn(path: &str) -> io::Result<Self> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let (stdin, stdout) = Option::zip(child.stdin.take(), child.stdout.take())
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "failed to open the child's stdio"))?;

        Ok(Process {
            pipe: Pipe::new(stdin, stdout),
            child,
        })
    }
}

#[async_trait]
impl Io for Process {
    async fn recv(&mut self) -> io::Result<String> {
        self.pipe.recv().await
    }

    async fn send(&mut self, msg: &str) -> io::Result<()> {
        self.pipe.send(msg).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.pipe.flush().await
    }
}
