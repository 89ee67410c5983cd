use blake3::Hasher;

use crate::types::Vec2;

/// Accumulates a deterministic digest of planner output, field by field in
/// little-endian byte order.
pub struct StepHasher(Hasher);

impl StepHasher {
    pub fn new() -> Self { StepHasher(Hasher::new()) }
    pub fn update_bytes(&mut self, bytes: &[u8]) { self.0.update(bytes); }
    pub fn finalize(self) -> [u8; 32] { *self.0.finalize().as_bytes() }
}

impl Default for StepHasher {
    fn default() -> Self { Self::new() }
}

#[inline]
pub fn hash_vec2(h: &mut StepHasher, v: &Vec2) {
    for c in [v.x, v.y] { h.update_bytes(&c.to_le_bytes()); }
}

#[inline]
pub fn hash_f64(h: &mut StepHasher, x: f64) {
    h.update_bytes(&x.to_le_bytes());
}

#[inline]
pub fn hash_u32(h: &mut StepHasher, x: u32) {
    h.update_bytes(&x.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::vec2;

    #[test]
    fn identical_streams_hash_identically() {
        let mut a = StepHasher::new();
        let mut b = StepHasher::new();
        hash_vec2(&mut a, &vec2(1.0, -2.0));
        hash_f64(&mut a, 0.5);
        hash_vec2(&mut b, &vec2(1.0, -2.0));
        hash_f64(&mut b, 0.5);
        assert_eq!(a.finalize(), b.finalize());
    }

    #[test]
    fn different_streams_diverge() {
        let mut a = StepHasher::new();
        let mut b = StepHasher::new();
        hash_u32(&mut a, 1);
        hash_u32(&mut b, 2);
        assert_ne!(a.finalize(), b.finalize());
    }
}
