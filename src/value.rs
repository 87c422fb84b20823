use crate::error::Error;
use crate::flag_set::{self, Flag, FlagSet};
use core::fmt::{Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::num::IntErrorKind;
use core::str::FromStr;

/// Associates a [`BitAware`] type with an optional [`FlagSet`] and its display labels
///
/// Usually implemented through [`flag_set!`](crate::flag_set!) or [`bit_aware!`](crate::bit_aware!).
pub trait Binding: 'static {
    /// Type name used by the [`Debug`] rendering
    const NAME: &'static str = "BitAware";

    const FLAGS: Option<&'static FlagSet>;

    /// Special values and the label [`Display`] shows for them instead of a member name
    const PROPERTIES: &'static [(u64, &'static str)] = &[];
}

/// [`Binding`] of plain values, with no flags attached
pub enum Unbound {}

impl Binding for Unbound {
    const FLAGS: Option<&'static FlagSet> = None;
}

/// A positive integer, optionally bound to a [`FlagSet`] that bounds and decomposes it
///
/// ```
/// use bit_aware::{flag_set, BitAware};
/// flag_set! {
///     pub struct Permission {
///         READ = 1,
///         WRITE = 2,
///         EXEC = 4,
///     }
/// }
/// let perm: BitAware<Permission> = BitAware::new(5).unwrap();
/// assert!(perm.has(Permission::READ));
/// assert!(!perm.has(Permission::WRITE));
/// assert_eq!(perm.to_string(), "5 [READ, EXEC]");
/// assert_eq!(format!("{perm:?}"), "BitAware(Permission.READ | Permission.EXEC)");
/// assert!(BitAware::<Permission>::new(8).is_err());
/// ```
pub struct BitAware<B: Binding = Unbound>(u64, PhantomData<fn() -> B>);

impl<B: Binding> BitAware<B> {
    /// Validates `value` against `B`
    ///
    /// Fails if `value` is not positive, or if it is larger than the sum of all the bound flags.
    /// Only the sum is checked, a value using a bit no member declares is accepted below it.
    pub fn new(value: impl Into<i128>) -> Result<Self, Error> {
        let value = value.into();
        if value <= 0 {
            return Err(reject(value, Error::NotPositive));
        }
        let value = u64::try_from(value).map_err(|_| reject(value, Error::Overflow))?;
        if let Some(flags) = B::FLAGS {
            if value > flags.limit() {
                return Err(reject(value, Error::ExceedsFlagSetup));
            }
        }
        Ok(BitAware(value, PhantomData))
    }

    /// Accepts either an existing value unchanged or any integer, see [`IntoBitAware`]
    pub fn validate(input: impl IntoBitAware<B>) -> Result<Self, Error> {
        input.into_bit_aware()
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Whether any bit of `flag` is set, `flag` doesn't have to be a member of the bound set
    pub fn has(&self, flag: impl Into<u64>) -> bool {
        self.0 & flag.into() != 0
    }

    pub fn flags(&self) -> Option<&'static FlagSet> {
        B::FLAGS
    }

    pub fn properties(&self) -> &'static [(u64, &'static str)] {
        B::PROPERTIES
    }

    /// The property label this exact value is declared with
    pub fn property(&self) -> Option<&'static str> {
        B::PROPERTIES
            .iter()
            .find(|(value, _)| *value == self.0)
            .map(|(_, label)| *label)
    }

    /// Iterate over the set members in declaration order, or over the raw value when unbound
    ///
    /// ```
    /// use bit_aware::{Active, BitAware};
    /// let raw: BitAware = BitAware::new(9).unwrap();
    /// assert_eq!(raw.iter().collect::<Vec<_>>(), [Active::Raw(9)]);
    /// ```
    pub fn iter(&self) -> Iter {
        let inner = match B::FLAGS {
            Some(flags) => IterInner::Members(self.0, flags.iter()),
            None => IterInner::Raw(Some(self.0)),
        };
        Iter(inner)
    }

    /// The set members, empty when unbound
    pub fn members(&self) -> impl Iterator<Item = Flag> + '_ {
        B::FLAGS
            .into_iter()
            .flat_map(FlagSet::iter)
            .filter(move |flag| self.has(*flag))
    }

    /// The text [`Display`] puts in front of the active members, `None` when unbound
    ///
    /// A declared property beats the name of the single member equal to the value, which beats
    /// the raw value.
    pub fn label(&self) -> Option<Label> {
        let flags = B::FLAGS?;
        let label = if let Some(property) = self.property() {
            Label::Name(property)
        } else if let Some(flag) = flags.iter().find(|flag| flag.value() == self.0) {
            Label::Name(flag.name())
        } else {
            Label::Raw(self.0)
        };
        Some(label)
    }
}

fn reject(value: impl Display, err: Error) -> Error {
    log::debug!("rejected {value}: {err}");
    err
}

/// Leading part of a bound [`BitAware`]'s [`Display`] rendering
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Name(&'static str),
    Raw(u64),
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Label::Name(name) => f.write_str(name),
            Label::Raw(value) => write!(f, "{value}"),
        }
    }
}

impl<B: Binding> Clone for BitAware<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Binding> Copy for BitAware<B> {}

impl<B: Binding, C: Binding> PartialEq<BitAware<C>> for BitAware<B> {
    fn eq(&self, other: &BitAware<C>) -> bool {
        self.0 == other.0
    }
}

impl<B: Binding> Eq for BitAware<B> {}

impl<B: Binding> PartialEq<u64> for BitAware<B> {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl<B: Binding> PartialEq<BitAware<B>> for u64 {
    fn eq(&self, other: &BitAware<B>) -> bool {
        *self == other.0
    }
}

impl<B: Binding> Hash for BitAware<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<B: Binding> From<BitAware<B>> for u64 {
    fn from(value: BitAware<B>) -> u64 {
        value.0
    }
}

impl<B: Binding> FromStr for BitAware<B> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let value: i128 = s.trim().parse().map_err(|e: core::num::ParseIntError| {
            let err = match e.kind() {
                IntErrorKind::PosOverflow => Error::Overflow,
                IntErrorKind::NegOverflow => Error::NotPositive,
                _ => Error::ExpectedInteger,
            };
            reject(s, err)
        })?;
        Self::new(value)
    }
}

impl<B: Binding> Display for BitAware<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let Some(label) = self.label() else {
            return write!(f, "{}", self.0);
        };
        write!(f, "{label} [")?;
        for (i, flag) in self.members().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(flag.name())?;
        }
        f.write_str("]")
    }
}

impl<B: Binding> Debug for BitAware<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}(", B::NAME)?;
        match B::FLAGS {
            Some(flags) => {
                for (i, flag) in self.members().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}.{}", flags.name(), flag.name())?;
                }
            }
            None => write!(f, "{}", self.0)?,
        }
        f.write_str(")")
    }
}

impl<B: Binding> IntoIterator for &BitAware<B> {
    type Item = Active;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// An element produced by iterating a [`BitAware`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Active {
    /// A set member of the bound [`FlagSet`]
    Member(Flag),
    /// The whole value of an unbound [`BitAware`]
    Raw(u64),
}

impl Active {
    pub fn value(self) -> u64 {
        match self {
            Active::Member(flag) => flag.value(),
            Active::Raw(value) => value,
        }
    }
}

impl From<Active> for u64 {
    fn from(active: Active) -> u64 {
        active.value()
    }
}

impl PartialEq<Flag> for Active {
    fn eq(&self, other: &Flag) -> bool {
        matches!(self, Active::Member(flag) if flag == other)
    }
}

impl PartialEq<u64> for Active {
    fn eq(&self, other: &u64) -> bool {
        matches!(self, Active::Raw(value) if value == other)
    }
}

/// Iterator returned by [`BitAware::iter`]
#[derive(Clone, Debug)]
pub struct Iter(IterInner);

#[derive(Clone, Debug)]
enum IterInner {
    Members(u64, flag_set::Iter),
    Raw(Option<u64>),
}

impl Iterator for Iter {
    type Item = Active;

    fn next(&mut self) -> Option<Active> {
        match &mut self.0 {
            IterInner::Members(value, members) => members
                .find(|flag| *value & flag.value() != 0)
                .map(Active::Member),
            IterInner::Raw(value) => value.take().map(Active::Raw),
        }
    }
}

impl FusedIterator for Iter {}

/// Input accepted by [`BitAware::validate`]
pub trait IntoBitAware<B: Binding> {
    fn into_bit_aware(self) -> Result<BitAware<B>, Error>;
}

impl<B: Binding> IntoBitAware<B> for BitAware<B> {
    fn into_bit_aware(self) -> Result<BitAware<B>, Error> {
        Ok(self)
    }
}

macro_rules! impl_into_bit_aware {
    ($($ty:ty),*) => {
        $(
            impl<B: Binding> IntoBitAware<B> for $ty {
                fn into_bit_aware(self) -> Result<BitAware<B>, Error> {
                    BitAware::new(self)
                }
            }
        )*
    };
}

impl_into_bit_aware!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

macro_rules! impl_into_bit_aware_wide {
    ($($ty:ty),*) => {
        $(
            impl<B: Binding> IntoBitAware<B> for $ty {
                fn into_bit_aware(self) -> Result<BitAware<B>, Error> {
                    let value = i128::try_from(self).map_err(|_| reject(self, Error::Overflow))?;
                    BitAware::new(value)
                }
            }
        )*
    };
}

impl_into_bit_aware_wide!(isize, usize, u128);

#[cfg(test)]
mod fixtures {
    use super::*;

    pub struct Rwx;

    const MEMBERS: &[Flag] = &[
        Flag::new("READ", 1),
        Flag::new("WRITE", 2),
        Flag::new("EXEC", 4),
    ];

    pub const SET: FlagSet = match FlagSet::new("Rwx", MEMBERS) {
        Ok(set) => set,
        Err(_) => panic!("invalid Rwx"),
    };

    impl Binding for Rwx {
        const FLAGS: Option<&'static FlagSet> = Some(&SET);
    }

    pub struct Mode;

    impl Binding for Mode {
        const NAME: &'static str = "Mode";
        const FLAGS: Option<&'static FlagSet> = Some(&SET);
        const PROPERTIES: &'static [(u64, &'static str)] = &[(7, "ALL"), (1, "READ_ONLY")];
    }

    pub const READ: Flag = MEMBERS[0];
    pub const WRITE: Flag = MEMBERS[1];
    pub const EXEC: Flag = MEMBERS[2];
}

#[test]
fn test_new() {
    use fixtures::Rwx;
    assert_eq!(BitAware::<Unbound>::new(0), Err(Error::NotPositive));
    assert_eq!(BitAware::<Unbound>::new(-5), Err(Error::NotPositive));
    assert_eq!(BitAware::<Rwx>::new(0), Err(Error::NotPositive));
    assert_eq!(BitAware::<Rwx>::new(8), Err(Error::ExceedsFlagSetup));
    assert_eq!(BitAware::<Rwx>::new(7).unwrap().get(), 7);
    assert_eq!(
        BitAware::<Unbound>::new(i128::from(u64::MAX) + 1),
        Err(Error::Overflow)
    );
    assert_eq!(BitAware::<Unbound>::new(u64::MAX).unwrap().get(), u64::MAX);
}

#[test]
fn test_has() {
    use fixtures::*;
    let value = BitAware::<Rwx>::new(5).unwrap();
    assert!(value.has(READ));
    assert!(!value.has(WRITE));
    assert!(value.has(EXEC));
    assert!(value.has(6u64));
    assert!(!value.has(8u64));
}

#[test]
fn test_iter() {
    use alloc::vec::Vec;
    use fixtures::*;
    let value = BitAware::<Rwx>::new(5).unwrap();
    let active: Vec<_> = value.iter().collect();
    assert_eq!(active, [Active::Member(READ), Active::Member(EXEC)]);
    // restartable
    assert_eq!(value.iter().count(), 2);
    assert_eq!((&value).into_iter().map(u64::from).sum::<u64>(), 5);

    let raw = BitAware::<Unbound>::new(9).unwrap();
    assert_eq!(raw.iter().collect::<Vec<_>>(), [Active::Raw(9)]);
    assert_eq!(raw.members().count(), 0);
}

#[test]
fn test_eq() {
    use fixtures::*;
    let bound = BitAware::<Rwx>::new(5).unwrap();
    let mode = BitAware::<Mode>::new(5).unwrap();
    let raw = BitAware::<Unbound>::new(5).unwrap();
    assert_eq!(bound, mode);
    assert_eq!(bound, raw);
    assert_eq!(bound, 5u64);
    assert_eq!(5u64, bound);
    assert_ne!(bound, BitAware::<Rwx>::new(4).unwrap());
}

#[test]
fn test_send_sync() {
    use core::cell::Cell;

    // a binding that is neither Send nor Sync itself
    #[allow(dead_code)]
    struct Local(Cell<u8>, *const u8);

    impl Binding for Local {
        const FLAGS: Option<&'static FlagSet> = Some(&fixtures::SET);
    }

    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BitAware<Local>>();
    assert_send_sync::<BitAware<Unbound>>();
    assert_send_sync::<Iter>();
}

#[test]
fn test_label() {
    use fixtures::*;
    assert_eq!(BitAware::<Rwx>::new(5).unwrap().label(), Some(Label::Raw(5)));
    assert_eq!(
        BitAware::<Rwx>::new(2).unwrap().label(),
        Some(Label::Name("WRITE"))
    );
    // a property wins over the member of the same value
    assert_eq!(
        BitAware::<Mode>::new(1).unwrap().label(),
        Some(Label::Name("READ_ONLY"))
    );
    assert_eq!(BitAware::<Unbound>::new(5).unwrap().label(), None);
}

#[test]
fn test_display() {
    use alloc::string::ToString;
    use fixtures::*;
    let show = |v: u64| BitAware::<Rwx>::new(v).unwrap().to_string();
    assert_eq!(show(5), "5 [READ, EXEC]");
    assert_eq!(show(2), "WRITE [WRITE]");
    assert_eq!(show(7), "7 [READ, WRITE, EXEC]");

    let mode = |v: u64| BitAware::<Mode>::new(v).unwrap().to_string();
    assert_eq!(mode(7), "ALL [READ, WRITE, EXEC]");
    assert_eq!(mode(1), "READ_ONLY [READ]");
    assert_eq!(mode(4), "EXEC [EXEC]");

    assert_eq!(BitAware::<Unbound>::new(42).unwrap().to_string(), "42");
}

#[test]
fn test_debug() {
    use alloc::format;
    use fixtures::*;
    assert_eq!(
        format!("{:?}", BitAware::<Rwx>::new(3).unwrap()),
        "BitAware(Rwx.READ | Rwx.WRITE)"
    );
    assert_eq!(
        format!("{:?}", BitAware::<Mode>::new(4).unwrap()),
        "Mode(Rwx.EXEC)"
    );
    assert_eq!(
        format!("{:?}", BitAware::<Unbound>::new(12).unwrap()),
        "BitAware(12)"
    );
}

#[test]
fn test_from_str() {
    use fixtures::Rwx;
    assert_eq!("6".parse::<BitAware<Rwx>>().unwrap().get(), 6);
    assert_eq!(" 3 ".parse::<BitAware<Rwx>>().unwrap().get(), 3);
    assert_eq!("abc".parse::<BitAware>(), Err(Error::ExpectedInteger));
    assert_eq!("1.5".parse::<BitAware>(), Err(Error::ExpectedInteger));
    assert_eq!("-2".parse::<BitAware>(), Err(Error::NotPositive));
    assert_eq!("9".parse::<BitAware<Rwx>>(), Err(Error::ExceedsFlagSetup));
    assert_eq!(
        "999999999999999999999999999999999999999999".parse::<BitAware>(),
        Err(Error::Overflow)
    );
}

#[test]
fn test_validate() {
    use fixtures::Rwx;
    let existing = BitAware::<Rwx>::new(3).unwrap();
    assert_eq!(BitAware::<Rwx>::validate(existing).unwrap(), existing);
    assert_eq!(BitAware::<Rwx>::validate(4u8).unwrap().get(), 4);
    assert_eq!(BitAware::<Rwx>::validate(-1i32), Err(Error::NotPositive));
    assert_eq!(BitAware::<Rwx>::validate(9usize), Err(Error::ExceedsFlagSetup));
    assert_eq!(BitAware::<Unbound>::validate(u128::MAX), Err(Error::Overflow));
}
