/// Iterates over the lowest `width` bits of a value, least significant bit first.
///
/// Used to drive groups of pins from an integer.
///
/// # Example
/// ```
/// # use logisim_core::data_structures::BitIter;
/// let mut bits = BitIter::new(0b0101, 4);
///
/// assert_eq!(bits.next(), Some(true));
/// assert_eq!(bits.next(), Some(false));
/// assert_eq!(bits.next(), Some(true));
/// assert_eq!(bits.next(), Some(false));
///
/// assert_eq!(bits.next(), None);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct BitIter {
    item: u32,
    width: u8,
    i: u8,
}
impl BitIter {
    /// Returns a new [BitIter] over the lowest `width` bits of `item`.
    ///
    /// # Panics
    ///
    /// Will panic if `width` > 32.
    pub fn new(item: u32, width: u8) -> Self {
        assert!(width <= 32, "Can't iterate over {} bits of a u32", width);
        Self { item, width, i: 0 }
    }

    /// Returns true if the iterated bits are all 0.
    ///
    /// # Example
    /// ```
    /// # use logisim_core::data_structures::BitIter;
    /// assert_eq!(BitIter::new(0b10000, 4).is_zero(), true);
    /// assert_eq!(BitIter::new(0b01000, 4).is_zero(), false);
    /// ```
    pub fn is_zero(&self) -> bool {
        let mut bits = *self;
        bits.all(|bit| !bit)
    }
}

impl Iterator for BitIter {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.i == self.width {
            return None;
        }
        let result = self.item & (1 << self.i) != 0;
        self.i += 1;

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.width - self.i) as usize;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for BitIter {}

/// Packs `bits` into an integer, the first bit becomes the least significant one.
///
/// Bits past the 32nd are ignored.
///
/// # Example
/// ```
/// # use logisim_core::data_structures::pack_bits;
/// assert_eq!(pack_bits([true, false, true, true].iter().copied()), 0b1101);
/// ```
pub fn pack_bits<I: IntoIterator<Item = bool>>(bits: I) -> u32 {
    bits.into_iter()
        .take(32)
        .enumerate()
        .fold(0, |acc, (i, bit)| if bit { acc | 1 << i } else { acc })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(BitIter::new(u32::MAX, 7).count(), 7);
        assert_eq!(BitIter::new(0, 0).count(), 0);
        assert_eq!(BitIter::new(1, 32).len(), 32);
    }

    #[test]
    fn test_ignores_high_bits() {
        let bits: Vec<_> = BitIter::new(0b1_0110, 4).collect();
        assert_eq!(bits, vec![false, true, true, false]);
    }

    #[test]
    fn test_pack_unpack() {
        for n in 0..256u32 {
            assert_eq!(pack_bits(BitIter::new(n, 8)), n);
        }
    }

    #[test]
    #[should_panic(expected = "Can't iterate over 33 bits of a u32")]
    fn test_too_wide() {
        BitIter::new(0, 33);
    }
}
