//! Register map
//!
//! An address-ordered collection of registers built once at bring-up and
//! handed to the dispatcher by reference. The map borrows its registers;
//! they are owned by the device.

use heapless::Vec;

use crate::register::Register;

/// Errors from building a register map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapError {
    /// Address already holds a register
    DuplicateAddress(u8),
    /// Map capacity exhausted
    Full,
}

struct Entry<'r> {
    address: u8,
    register: &'r mut dyn Register,
}

/// Address-ordered register map with capacity `N`
pub struct RegisterMap<'r, const N: usize> {
    entries: Vec<Entry<'r>, N>,
}

impl<const N: usize> Default for RegisterMap<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r, const N: usize> RegisterMap<'r, N> {
    /// Create an empty map
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, address: u8) -> Result<usize, usize> {
        self.entries
            .binary_search_by_key(&address, |entry| entry.address)
    }

    /// Add a register at `address`
    pub fn insert(&mut self, address: u8, register: &'r mut dyn Register) -> Result<(), MapError> {
        match self.position(address) {
            Ok(_) => Err(MapError::DuplicateAddress(address)),
            Err(idx) => self
                .entries
                .insert(idx, Entry { address, register })
                .map_err(|_| MapError::Full),
        }
    }

    /// Look up a register by address
    pub fn get(&self, address: u8) -> Option<&(dyn Register + 'r)> {
        let idx = self.position(address).ok()?;
        Some(&*self.entries[idx].register)
    }

    /// Look up a register by address for reading or writing
    pub fn get_mut(&mut self, address: u8) -> Option<&mut (dyn Register + 'r)> {
        let idx = self.position(address).ok()?;
        Some(&mut *self.entries[idx].register)
    }

    /// Check if a register exists at `address`
    pub fn contains(&self, address: u8) -> bool {
        self.position(address).is_ok()
    }

    /// Iterate over registers in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &(dyn Register + 'r))> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.address, &*entry.register))
    }

    /// Number of registers in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map holds no registers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::MemoryRegister;
    use crate::types::{RegisterType, Value};

    #[test]
    fn test_insert_keeps_address_order() {
        let mut a = MemoryRegister::<u8, 1>::default();
        let mut b = MemoryRegister::<u16, 2>::default();
        let mut c = MemoryRegister::<f32, 1>::default();

        let mut map = RegisterMap::<4>::new();
        map.insert(40, &mut a).unwrap();
        map.insert(32, &mut b).unwrap();
        map.insert(35, &mut c).unwrap();

        let layout: heapless::Vec<(u8, RegisterType, usize), 4> = map
            .iter()
            .map(|(addr, reg)| (addr, reg.register_type(), reg.len()))
            .collect();
        assert_eq!(
            layout.as_slice(),
            &[
                (32, RegisterType::U16, 2),
                (35, RegisterType::Float, 1),
                (40, RegisterType::U8, 1),
            ]
        );
        assert_eq!(map.len(), 3);
        assert!(map.contains(35));
        assert!(!map.contains(33));
    }

    #[test]
    fn test_duplicate_address_rejected() {
        let mut a = MemoryRegister::<u8, 1>::default();
        let mut b = MemoryRegister::<u8, 1>::default();

        let mut map = RegisterMap::<4>::new();
        map.insert(32, &mut a).unwrap();
        assert_eq!(map.insert(32, &mut b), Err(MapError::DuplicateAddress(32)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_capacity() {
        let mut a = MemoryRegister::<u8, 1>::default();
        let mut b = MemoryRegister::<u8, 1>::default();

        let mut map = RegisterMap::<1>::new();
        assert!(map.is_empty());
        map.insert(32, &mut a).unwrap();
        assert_eq!(map.insert(33, &mut b), Err(MapError::Full));
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut a = MemoryRegister::<u8, 1>::default();
        {
            let mut map = RegisterMap::<2>::new();
            map.insert(32, &mut a).unwrap();

            let reg = map.get_mut(32).unwrap();
            reg.write(RegisterType::U8, &[Value::U8(9)]).unwrap();
            assert!(map.get(33).is_none());
            assert_eq!(map.get(32).map(|r| r.len()), Some(1));
        }
        assert_eq!(a.value(), &[9]);
    }
}
