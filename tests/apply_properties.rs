// tests/apply_properties.rs

use proptest::prelude::*;
use kubewait::exec::RealExecutor;
use kubewait::kube::{FILE_FLAG, K8S_APPLY, Kubectl};

fn path_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_./-]{1,24}"
}

proptest! {
    #[test]
    fn apply_spec_keeps_every_path_in_order(
        paths in proptest::collection::vec(path_strategy(), 0..8)
    ) {
        let kubectl = Kubectl::new(RealExecutor::new());
        let spec = kubectl.apply_files_spec(&paths);
        let args = spec.arguments();

        prop_assert_eq!(args.len(), 1 + 2 * paths.len());
        prop_assert_eq!(args[0].as_str(), K8S_APPLY);

        for (i, path) in paths.iter().enumerate() {
            prop_assert_eq!(args[1 + 2 * i].as_str(), FILE_FLAG);
            prop_assert_eq!(&args[2 + 2 * i], path);
        }
    }
}
