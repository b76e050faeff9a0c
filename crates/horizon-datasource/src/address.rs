//! Addresses for locating items in a sectioned data source.
//!
//! An [`Address`] is the `(section, index)` pair a view host uses to ask for
//! a cell. It carries no validity flag of its own: every store entry point
//! checks it against the live section and item counts, so an address
//! obtained before a mutation can be reused safely (it either resolves or
//! yields an out-of-range error).

use std::fmt;

/// Identifies one item's position in a sectioned data source.
///
/// Addresses order section-major: every address in section `0` sorts before
/// every address in section `1`.
///
/// # Example
///
/// ```
/// use horizon_datasource::Address;
///
/// let header_row = Address::new(0, 0);
/// let next = header_row.with_index(1);
///
/// assert!(header_row < next);
/// assert_eq!(next, Address::from((0, 1)));
/// assert_eq!(next.to_string(), "(0, 1)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address {
    /// The section containing the item.
    pub section: usize,
    /// The position of the item within its section.
    pub index: usize,
}

impl Address {
    /// Creates an address for `index` within `section`.
    #[inline]
    pub const fn new(section: usize, index: usize) -> Self {
        Self { section, index }
    }

    /// Returns the address of the first item in `section`.
    #[inline]
    pub const fn section_start(section: usize) -> Self {
        Self { section, index: 0 }
    }

    /// Returns an address in the same section at a different index.
    #[inline]
    pub const fn with_index(self, index: usize) -> Self {
        Self {
            section: self.section,
            index,
        }
    }

    /// Returns an address with the same index in a different section.
    #[inline]
    pub const fn with_section(self, section: usize) -> Self {
        Self {
            section,
            index: self.index,
        }
    }
}

impl From<(usize, usize)> for Address {
    fn from((section, index): (usize, usize)) -> Self {
        Self::new(section, index)
    }
}

impl From<Address> for (usize, usize) {
    fn from(address: Address) -> Self {
        (address.section, address.index)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ordering_is_section_major() {
        let mut addresses = vec![
            Address::new(1, 0),
            Address::new(0, 5),
            Address::new(1, 2),
            Address::new(0, 0),
        ];
        addresses.sort();

        assert_eq!(
            addresses,
            vec![
                Address::new(0, 0),
                Address::new(0, 5),
                Address::new(1, 0),
                Address::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_builders() {
        let address = Address::section_start(3);
        assert_eq!(address, Address::new(3, 0));
        assert_eq!(address.with_index(7), Address::new(3, 7));
        assert_eq!(address.with_index(7).with_section(1), Address::new(1, 7));
    }

    #[test]
    fn test_tuple_conversions() {
        let address: Address = (2, 4).into();
        assert_eq!(address.section, 2);
        assert_eq!(address.index, 4);

        let pair: (usize, usize) = address.into();
        assert_eq!(pair, (2, 4));
    }

    #[test]
    fn test_hash() {
        let mut set = HashSet::new();
        set.insert(Address::new(0, 1));
        set.insert(Address::new(0, 1));
        set.insert(Address::new(1, 0));
        assert_eq!(set.len(), 2);
    }
}
