//! Hash domain lock tests.
//!
//! The three `CUBIST::` domains are fixed: their count, their bytes, and the
//! fingerprints they produce. Changing any of them invalidates stored
//! fingerprints and model digests.

use std::path::Path;

use cubist_kernel::digest::hash::{canonical_hash, HashDomain};
use cubist_kernel::puzzle::cube::CubeState;

#[test]
fn domain_bytes_are_pinned() {
    let pinned: [(HashDomain, &[u8]); 3] = [
        (HashDomain::CubeState, b"CUBIST::CUBE_STATE::V1\0"),
        (HashDomain::SearchPolicy, b"CUBIST::SEARCH_POLICY::V1\0"),
        (HashDomain::OracleWeights, b"CUBIST::ORACLE_WEIGHTS::V1\0"),
    ];
    assert_eq!(
        HashDomain::ALL.len(),
        pinned.len(),
        "new domain added; pin its bytes here"
    );
    for (domain, bytes) in pinned {
        assert_eq!(domain.as_bytes(), bytes, "{domain} bytes changed");
    }
}

/// Domain literals live only in `hash_domain.rs`; everything else goes
/// through `HashDomain`.
#[test]
fn no_domain_literals_outside_hash_domain_rs() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let mut violations = Vec::new();
    for crate_src in ["kernel/src", "search/src", "harness/src"] {
        collect_literals(&root.join(crate_src), &mut violations);
    }
    assert!(
        violations.is_empty(),
        "domain literals outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}

fn collect_literals(dir: &Path, violations: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect_literals(&path, violations);
            continue;
        }
        let is_rust = path.extension().and_then(|e| e.to_str()) == Some("rs");
        if !is_rust || path.ends_with("hash_domain.rs") {
            continue;
        }
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        for (i, line) in content.lines().enumerate() {
            if line.contains("b\"CUBIST::") {
                violations.push(format!("{}:{}", path.display(), i + 1));
            }
        }
    }
}

#[test]
fn solved_fingerprints_are_pinned() {
    let cases = [
        (
            2,
            "sha256:915f70b0a4f7fd0dd2d94e3321608071839b495e4a78fbd597218d7bd3db4c03",
        ),
        (
            3,
            "sha256:a4417fffc948ed64d36b2a46ae9e824b2477dd40ff9010a01fae0baf1e9e7e7a",
        ),
    ];
    for (size, expected) in cases {
        let solved = CubeState::solved(size).unwrap();
        assert_eq!(solved.fingerprint().as_str(), expected, "size {size}");
    }
}

#[test]
fn domains_separate_identical_bytes() {
    let bytes = CubeState::solved(2).unwrap().identity_bytes();
    let digests: std::collections::BTreeSet<_> = HashDomain::ALL
        .iter()
        .map(|&d| canonical_hash(d, &bytes))
        .collect();
    assert_eq!(digests.len(), HashDomain::ALL.len());
}
