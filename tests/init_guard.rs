//! The init barrier: resolving a vocabulary before setup is a programming
//! error and fails fast.
//!
//! Lives in its own test binary so the process-wide vocabulary cache is
//! guaranteed untouched; any other test calling `vocab::init()` in the same
//! process would defeat the check.

use promptgauge::vocab;

#[test]
#[should_panic(expected = "vocab::init() must complete")]
fn resolve_before_init_fails_fast() {
    vocab::resolve("cl100k_base");
}
