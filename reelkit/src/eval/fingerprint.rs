use xxhash_rust::xxh3::Xxh3;

use crate::composition::registry::CompositionProps;
use crate::foundation::error::ReelkitResult;

const XXH3_SEED: u64 = 0x5eed_7ee1_c0de_0001;

/// Stable fingerprint of a props value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropsFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Fingerprint `props` by composition id and canonical JSON.
///
/// Object keys serialize in sorted order, so two props values that differ only in key order hash
/// the same.
pub fn fingerprint_props(props: &CompositionProps) -> ReelkitResult<PropsFingerprint> {
    let mut h = StableHasher::new();
    h.write_str(props.id().as_str());
    let json = serde_json::to_vec(&props.to_json()?)?;
    h.write_bytes(&json);
    Ok(h.finish())
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.write_u64(b.len() as u64);
        self.inner.update(b);
    }

    fn write_u64(&mut self, v: u64) {
        self.inner.update(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> PropsFingerprint {
        let v = self.inner.digest128();
        PropsFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
