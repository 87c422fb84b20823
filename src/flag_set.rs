use crate::error::{DefinitionError, LookupError};
use core::fmt::{Debug, Formatter};
use core::iter::FusedIterator;
use core::ops::{BitAnd, BitOr};

/// One named bit of a [`FlagSet`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Flag {
    name: &'static str,
    value: u64,
}

impl Flag {
    pub const fn new(name: &'static str, value: u64) -> Self {
        Flag { name, value }
    }

    pub const fn name(self) -> &'static str {
        self.name
    }

    pub const fn value(self) -> u64 {
        self.value
    }

    /// Names starting with `_` are bookkeeping entries and never members
    pub const fn is_reserved(self) -> bool {
        let bytes = self.name.as_bytes();
        !bytes.is_empty() && bytes[0] == b'_'
    }
}

impl From<Flag> for u64 {
    fn from(flag: Flag) -> u64 {
        flag.value
    }
}

impl BitOr for Flag {
    type Output = u64;

    fn bitor(self, rhs: Flag) -> u64 {
        self.value | rhs.value
    }
}

impl BitOr<u64> for Flag {
    type Output = u64;

    fn bitor(self, rhs: u64) -> u64 {
        self.value | rhs
    }
}

impl BitOr<Flag> for u64 {
    type Output = u64;

    fn bitor(self, rhs: Flag) -> u64 {
        self | rhs.value
    }
}

impl BitAnd for Flag {
    type Output = u64;

    fn bitand(self, rhs: Flag) -> u64 {
        self.value & rhs.value
    }
}

impl BitAnd<u64> for Flag {
    type Output = u64;

    fn bitand(self, rhs: u64) -> u64 {
        self.value & rhs
    }
}

impl BitAnd<Flag> for u64 {
    type Output = u64;

    fn bitand(self, rhs: Flag) -> u64 {
        self & rhs.value
    }
}

const fn same_name(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// A closed, ordered set of named power-of-two flags
///
/// A member whose value repeats an earlier member's value is an alias: it can be found by name
/// but [`iter`](FlagSet::iter) and [`lookup`](FlagSet::lookup) only ever report the first one.
///
/// ```
/// use bit_aware::{Flag, FlagSet};
/// const MEMBERS: &[Flag] = &[Flag::new("READ", 1), Flag::new("WRITE", 2), Flag::new("EXEC", 4)];
/// let set = FlagSet::new("Permission", MEMBERS).unwrap();
/// assert_eq!(set.limit(), 7);
/// assert_eq!(set.lookup(2).unwrap().name(), "WRITE");
/// assert!(set.lookup(3).is_err());
/// ```
#[derive(Copy, Clone)]
pub struct FlagSet {
    name: &'static str,
    members: &'static [Flag],
    limit: u64,
}

impl FlagSet {
    /// Validates `members` and builds the set
    ///
    /// Every non-reserved member must be a power of two greater than zero and no name may repeat.
    /// Being a `const fn` this can run at compile time, see [`flag_set!`](crate::flag_set!).
    pub const fn new(
        name: &'static str,
        members: &'static [Flag],
    ) -> Result<Self, DefinitionError> {
        let mut limit = 0;
        let mut i = 0;
        while i < members.len() {
            let flag = members[i];
            let mut j = 0;
            while j < i {
                if same_name(members[j].name, flag.name) {
                    return Err(DefinitionError::DuplicateName { name: flag.name });
                }
                j += 1;
            }
            if !flag.is_reserved() {
                if !flag.value.is_power_of_two() {
                    return Err(DefinitionError::NotPowerOfTwo {
                        name: flag.name,
                        value: flag.value,
                    });
                }
                // aliases repeat a bit already counted
                limit |= flag.value;
            }
            i += 1;
        }
        Ok(FlagSet {
            name,
            members,
            limit,
        })
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Sum of the values of all members, the largest value a bound [`BitAware`](crate::BitAware) may hold
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Iterate over the members in declaration order, skipping aliases
    pub fn iter(&self) -> Iter {
        Iter {
            members: self.members,
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Returns the member whose value is exactly `value`
    pub fn lookup(&self, value: u64) -> Result<Flag, LookupError> {
        self.iter().find(|flag| flag.value == value).ok_or_else(|| {
            log::debug!("{value} does not name a single member of {}", self.name);
            LookupError {
                set: self.name,
                value,
            }
        })
    }

    /// Whether `value` is exactly one of the members
    pub fn contains(&self, value: u64) -> bool {
        self.iter().any(|flag| flag.value == value)
    }

    /// Returns the member (or alias) called `name`
    pub fn find(&self, name: &str) -> Option<Flag> {
        self.members
            .iter()
            .copied()
            .find(|flag| !flag.is_reserved() && flag.name == name)
    }
}

impl IntoIterator for &FlagSet {
    type Item = Flag;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl Debug for FlagSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ", self.name)?;
        f.debug_map()
            .entries(self.iter().map(|flag| (flag.name, flag.value)))
            .finish()
    }
}

/// Iterator over the members of a [`FlagSet`]
#[derive(Clone, Debug)]
pub struct Iter {
    members: &'static [Flag],
    index: usize,
}

impl Iterator for Iter {
    type Item = Flag;

    fn next(&mut self) -> Option<Flag> {
        while let Some(&flag) = self.members.get(self.index) {
            let earlier = &self.members[..self.index];
            self.index += 1;
            let alias = earlier
                .iter()
                .any(|prev| !prev.is_reserved() && prev.value == flag.value);
            if !flag.is_reserved() && !alias {
                return Some(flag);
            }
        }
        None
    }
}

impl FusedIterator for Iter {}

#[cfg(test)]
const RWX: &[Flag] = &[
    Flag::new("READ", 1),
    Flag::new("WRITE", 2),
    Flag::new("EXEC", 4),
];

#[test]
fn test_powers_of_two() {
    const GOOD: &[Flag] = &[
        Flag::new("A", 1),
        Flag::new("B", 2),
        Flag::new("C", 4),
        Flag::new("D", 8),
    ];
    let set = FlagSet::new("Good", GOOD).unwrap();
    assert_eq!(set.limit(), 15);
    assert_eq!(set.len(), 4);

    const SIX: &[Flag] = &[Flag::new("A", 1), Flag::new("BAD", 6)];
    assert_eq!(
        FlagSet::new("Six", SIX).unwrap_err(),
        DefinitionError::NotPowerOfTwo {
            name: "BAD",
            value: 6
        }
    );

    const ZERO: &[Flag] = &[Flag::new("NONE", 0)];
    assert_eq!(
        FlagSet::new("Zero", ZERO).unwrap_err(),
        DefinitionError::NotPowerOfTwo {
            name: "NONE",
            value: 0
        }
    );
}

#[test]
fn test_duplicate_name() {
    const DUP: &[Flag] = &[Flag::new("A", 1), Flag::new("A", 2)];
    assert_eq!(
        FlagSet::new("Dup", DUP).unwrap_err(),
        DefinitionError::DuplicateName { name: "A" }
    );
}

#[test]
fn test_reserved_and_empty() {
    const RESERVED: &[Flag] = &[Flag::new("_ignore", 3), Flag::new("A", 1)];
    let set = FlagSet::new("Reserved", RESERVED).unwrap();
    assert_eq!(set.iter().collect::<alloc::vec::Vec<_>>(), [Flag::new("A", 1)]);
    assert_eq!(set.limit(), 1);
    assert_eq!(set.find("_ignore"), None);

    const ONLY_RESERVED: &[Flag] = &[Flag::new("_x", 12)];
    let set = FlagSet::new("Empty", ONLY_RESERVED).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.limit(), 0);
}

#[test]
fn test_aliases() {
    const ALIASED: &[Flag] = &[
        Flag::new("READ", 1),
        Flag::new("VIEW", 1),
        Flag::new("WRITE", 2),
    ];
    let set = FlagSet::new("Aliased", ALIASED).unwrap();
    let names: alloc::vec::Vec<_> = set.iter().map(Flag::name).collect();
    assert_eq!(names, ["READ", "WRITE"]);
    assert_eq!(set.limit(), 3);
    assert_eq!(set.lookup(1).unwrap().name(), "READ");
    assert_eq!(set.find("VIEW"), Some(Flag::new("VIEW", 1)));
}

#[test]
fn test_lookup() {
    let set = FlagSet::new("Permission", RWX).unwrap();
    assert_eq!(set.lookup(4), Ok(Flag::new("EXEC", 4)));
    assert_eq!(
        set.lookup(5),
        Err(LookupError {
            set: "Permission",
            value: 5
        })
    );
    assert!(set.contains(2));
    assert!(!set.contains(3));
    assert_eq!(set.find("WRITE").map(Flag::value), Some(2));
    assert_eq!(set.find("write"), None);
}

#[test]
fn test_combine() {
    let set = FlagSet::new("Permission", RWX).unwrap();
    let read = set.find("READ").unwrap();
    let exec = set.find("EXEC").unwrap();
    assert_eq!(read | exec, 5);
    assert_eq!((read | exec) & exec, 4);
    assert_eq!(read & exec, 0);
    assert_eq!(6 | read, 7);
    assert_eq!(exec & 12u64, 4);
}

#[test]
fn test_debug() {
    use alloc::format;
    let set = FlagSet::new("Permission", RWX).unwrap();
    assert_eq!(
        format!("{set:?}"),
        r#"Permission {"READ": 1, "WRITE": 2, "EXEC": 4}"#
    );
}
