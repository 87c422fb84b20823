use bit_aware::{
    bit_aware, flag_set, Active, BitAware, DefinitionError, Error, Flag, FlagSet, LookupError,
    Unbound,
};

flag_set! {
    pub struct Permission {
        READ = 1,
        WRITE = 2,
        EXEC = 4,
    }
}

flag_set! {
    pub struct Other {
        X = 1,
        Y = 2,
        Z = 4,
        W = 8,
    }
}

flag_set! {
    pub struct Ab {
        A = 1,
        B = 2,
    }
}

flag_set! {
    pub struct Sparse {
        LOW = 1,
        HIGH = 8,
    }
}

flag_set! {
    pub struct Nothing {}
}

bit_aware! {
    pub struct Access: Permission {
        ALL = 7,
        READ_WRITE = 3,
    }
}

#[test]
fn power_of_two_enforcement() {
    const VALID: &[Flag] = &[
        Flag::new("A", 1),
        Flag::new("B", 2),
        Flag::new("C", 4),
        Flag::new("D", 8),
    ];
    assert!(FlagSet::new("Valid", VALID).is_ok());

    for (name, value) in [("ZERO", 0), ("THREE", 3), ("SIX", 6), ("TWELVE", 12)] {
        let members: &'static [Flag] = Box::leak(Box::new([Flag::new("A", 1), Flag::new(name, value)]));
        assert_eq!(
            FlagSet::new("Invalid", members).unwrap_err(),
            DefinitionError::NotPowerOfTwo { name, value }
        );
    }
}

#[test]
fn positivity() {
    assert_eq!(BitAware::<Unbound>::new(0), Err(Error::NotPositive));
    assert_eq!(BitAware::<Unbound>::new(-5), Err(Error::NotPositive));
    assert_eq!(BitAware::<Permission>::new(0), Err(Error::NotPositive));
    assert_eq!(BitAware::<Permission>::new(-5), Err(Error::NotPositive));
}

#[test]
fn range_bound() {
    assert_eq!(BitAware::<Permission>::new(7).unwrap(), 7u64);
    assert_eq!(BitAware::<Permission>::new(8), Err(Error::ExceedsFlagSetup));
}

#[test]
fn range_bound_only_checks_the_sum() {
    // 4 is not a declared bit of Sparse, but it is below 1 + 8
    let value = BitAware::<Sparse>::new(4).unwrap();
    assert_eq!(value.iter().count(), 0);
    assert_eq!(value.to_string(), "4 []");
    assert_eq!(format!("{value:?}"), "BitAware()");
}

#[test]
fn empty_flag_set_accepts_nothing() {
    assert!(Nothing::SET.is_empty());
    assert_eq!(BitAware::<Nothing>::new(1), Err(Error::ExceedsFlagSetup));
}

#[test]
fn membership() {
    let value = BitAware::<Permission>::new(5).unwrap();
    assert!(value.has(Permission::READ));
    assert!(!value.has(Permission::WRITE));
    assert!(value.has(Permission::EXEC));
}

#[test]
fn iteration_order() {
    let value = BitAware::<Permission>::new(5).unwrap();
    let active: Vec<_> = value.iter().collect();
    assert_eq!(
        active,
        [
            Active::Member(Permission::READ),
            Active::Member(Permission::EXEC)
        ]
    );
    let members: Vec<_> = value.members().collect();
    assert_eq!(members, [Permission::READ, Permission::EXEC]);
}

#[test]
fn unbound_iteration() {
    let value = BitAware::<Unbound>::new(9).unwrap();
    assert_eq!(value.iter().collect::<Vec<_>>(), [Active::Raw(9)]);
    let mut iter = value.iter();
    assert_eq!(iter.next(), Some(Active::Raw(9)));
    assert_eq!(iter.next(), None);
}

#[test]
fn equality() {
    let value = BitAware::<Permission>::new(5).unwrap();
    assert_eq!(value, BitAware::<Other>::new(5).unwrap());
    assert_eq!(value, BitAware::<Unbound>::new(5).unwrap());
    assert_eq!(value, 5u64);
    assert_ne!(value, 4u64);
}

#[test]
fn rendering() {
    assert_eq!(BitAware::<Ab>::new(3).unwrap().to_string(), "3 [A, B]");
    assert_eq!(BitAware::<Ab>::new(1).unwrap().to_string(), "A [A]");
    assert_eq!(BitAware::<Unbound>::new(3).unwrap().to_string(), "3");

    assert_eq!(
        BitAware::<Access>::new(Access::ALL).unwrap().to_string(),
        "ALL [READ, WRITE, EXEC]"
    );
    assert_eq!(
        BitAware::<Access>::new(3).unwrap().to_string(),
        "READ_WRITE [READ, WRITE]"
    );
    assert_eq!(BitAware::<Access>::new(2).unwrap().to_string(), "WRITE [WRITE]");
    assert_eq!(BitAware::<Access>::new(6).unwrap().to_string(), "6 [WRITE, EXEC]");
}

#[test]
fn debug_rendering() {
    assert_eq!(
        format!("{:?}", BitAware::<Ab>::new(3).unwrap()),
        "BitAware(Ab.A | Ab.B)"
    );
    assert_eq!(
        format!("{:?}", BitAware::<Access>::new(5).unwrap()),
        "Access(Permission.READ | Permission.EXEC)"
    );
    assert_eq!(format!("{:?}", BitAware::<Unbound>::new(9).unwrap()), "BitAware(9)");
}

#[test]
fn idempotent_construction() {
    for raw in 1..=7u64 {
        let value = BitAware::<Permission>::new(raw).unwrap();
        let again = BitAware::<Permission>::new(u64::from(value)).unwrap();
        assert_eq!(value, again);
        assert_eq!(BitAware::<Permission>::validate(value).unwrap(), value);
    }
}

#[test]
fn lookup() {
    assert_eq!(Permission::SET.lookup(2), Ok(Permission::WRITE));
    assert_eq!(
        Permission::SET.lookup(6),
        Err(LookupError {
            set: "Permission",
            value: 6
        })
    );
    assert_eq!(Permission::SET.find("EXEC"), Some(Permission::EXEC));
}
