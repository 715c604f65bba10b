pub mod builders;
pub mod scripted_executor;
pub mod sleeper;

pub use scripted_executor::ScriptedExecutor;
pub use sleeper::RecordingSleeper;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

use kubewait::kube::Kubectl;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// A kubectl client wired to fresh fakes, plus handles to inspect them.
pub fn fake_kubectl(
    executor: ScriptedExecutor,
) -> (
    Kubectl<ScriptedExecutor, RecordingSleeper>,
    ScriptedExecutor,
    RecordingSleeper,
) {
    let sleeper = RecordingSleeper::new();
    let kubectl = Kubectl::with_sleeper(executor.clone(), sleeper.clone());
    (kubectl, executor, sleeper)
}
