#![no_main]

use libfuzzer_sys::fuzz_target;
use syzygy_deps::{DependencyOracle, Material, SyzygyOracle};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(material) = s.parse::<Material>() else {
        return;
    };

    let normalized = material.into_normalized();
    assert!(normalized.is_normalized());
    assert_eq!(normalized.clone().into_normalized(), normalized);

    let oracle = SyzygyOracle::new();
    let identifier = oracle.normalize(s).expect("parsed before");
    assert_eq!(identifier.as_str(), normalized.to_string());

    for one_king in [false, true] {
        for dep in normalized.dependencies(one_king) {
            assert!(dep.is_normalized());
            assert!(dep.count() <= normalized.count());
        }
    }
});
