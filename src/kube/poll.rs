// src/kube/poll.rs

//! Bounded readiness polling.
//!
//! Each iteration probes every requested resource type once, in order, with
//! `kubectl get <type>` and stderr discarded. An iteration counts as ready
//! only if every probe in it succeeded; a failing probe does not stop the
//! remaining probes of the same iteration. After every iteration, the last
//! one included, the loop pauses for [`POLL_INTERVAL`].
//!
//! A budget of `n` seconds allows at most `n` iterations, so a budget of 0
//! fails without probing anything.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::{KubewaitError, Result};
use crate::exec::ProcessExecutor;

use super::Kubectl;
use super::clock::Sleeper;

/// Fixed pause between iterations. No backoff.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A validated time budget plus the resource types to wait for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    max_seconds: u64,
    resource_types: Vec<String>,
}

impl PollRequest {
    /// Fails with [`KubewaitError::Validation`] if `max_seconds` is negative.
    pub fn new<I, T>(max_seconds: i64, resource_types: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let max_seconds = u64::try_from(max_seconds).map_err(|_| {
            KubewaitError::Validation(format!(
                "'max_seconds' should be non negative (got {max_seconds})"
            ))
        })?;

        Ok(Self {
            max_seconds,
            resource_types: resource_types.into_iter().map(Into::into).collect(),
        })
    }

    pub fn max_seconds(&self) -> u64 {
        self.max_seconds
    }

    pub fn resource_types(&self) -> &[String] {
        &self.resource_types
    }
}

/// Successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// 1-based index of the iteration in which every probe succeeded.
    pub iterations: u64,
}

impl<E: ProcessExecutor, S: Sleeper> Kubectl<E, S> {
    /// Validate the budget, then [`wait_for_ready`](Self::wait_for_ready).
    pub async fn wait_for_resource_types<T: AsRef<str>>(
        &self,
        max_seconds: i64,
        resource_types: &[T],
    ) -> Result<PollReport> {
        let request = PollRequest::new(
            max_seconds,
            resource_types.iter().map(|t| t.as_ref().to_string()),
        )?;
        self.wait_for_ready(&request).await
    }

    /// Poll until one iteration sees every resource type, or the budget is
    /// spent.
    ///
    /// On timeout the error lists the types whose probe failed in the last
    /// iteration (all of them if no iteration ran).
    pub async fn wait_for_ready(&self, request: &PollRequest) -> Result<PollReport> {
        let budget = request.max_seconds();
        let mut pending: Vec<String> = request.resource_types().to_vec();

        debug!(budget, types = ?request.resource_types(), "waiting for kubernetes resources");

        for iteration in 1..=budget {
            pending = self.probe_all(request.resource_types()).await;

            debug!(iteration, budget, ?pending, "probe iteration finished");

            self.sleeper.sleep(POLL_INTERVAL).await;

            if pending.is_empty() {
                info!(iterations = iteration, "kubernetes resources are ready");
                return Ok(PollReport {
                    iterations: iteration,
                });
            }
        }

        warn!(budget, ?pending, "kubernetes resources not ready within budget");
        Err(KubewaitError::ReadinessTimeout {
            seconds: budget,
            pending,
        })
    }

    /// Probe every type once, in order, returning the ones that failed.
    async fn probe_all(&self, resource_types: &[String]) -> Vec<String> {
        let mut failed = Vec::new();
        for resource_type in resource_types {
            let spec = self.get_spec(resource_type);
            if let Err(err) = self.executor.run(spec, false).await {
                debug!(resource_type = %resource_type, error = %err, "resource not ready yet");
                failed.push(resource_type.clone());
            }
        }
        failed
    }
}
