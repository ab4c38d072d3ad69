use serde::Serialize;

/// Monotonic counter stamped on view transitions and outbound requests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Epoch(u64);

impl Epoch {
    pub fn value(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::Epoch;

    #[test]
    fn next_is_strictly_greater() {
        let e = Epoch::default();
        assert!(e.next() > e);
        assert_eq!(e.next().value(), 1);
    }
}
