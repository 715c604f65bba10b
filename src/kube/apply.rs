// src/kube/apply.rs

//! `kubectl apply` from manifest files or from a stdin payload.

use tracing::info;

use crate::errors::Result;
use crate::exec::ProcessExecutor;

use super::clock::Sleeper;
use super::{FILE_FLAG, K8S_APPLY, Kubectl};

/// The arguments of an apply over `paths`: the verb, then one
/// `-f <path>` pair per path in input order.
pub fn apply_files_args<P: AsRef<str>>(paths: &[P]) -> Vec<String> {
    let mut args = Vec::with_capacity(1 + paths.len() * 2);
    args.push(K8S_APPLY.to_string());
    for path in paths {
        args.push(FILE_FLAG.to_string());
        args.push(path.as_ref().to_string());
    }
    args
}

impl<E: ProcessExecutor, S: Sleeper> Kubectl<E, S> {
    /// Apply resources from a list of files, URLs or directories in one
    /// kubectl call, relaying its stderr.
    pub async fn apply_from_files<P: AsRef<str>>(&self, paths: &[P]) -> Result<()> {
        let spec = self.apply_files_spec(paths);
        info!(files = paths.len(), cmd = %spec, "applying manifests from files");
        self.executor.run(spec, true).await
    }

    /// Apply resources from `payload`, fed verbatim to kubectl's stdin.
    pub async fn apply_from_stdin(&self, payload: impl Into<Vec<u8>>) -> Result<()> {
        let payload = payload.into();
        let spec = self.apply_stdin_spec();
        info!(bytes = payload.len(), cmd = %spec, "applying manifests from stdin");
        self.executor.run_with_stdin(payload, spec).await
    }
}
