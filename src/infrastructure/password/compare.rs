//! Fixed-time byte comparison

use subtle::ConstantTimeEq;

/// Compare two byte slices without short-circuiting on the first difference.
///
/// Only the fact that lengths differ is observable through timing.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}
