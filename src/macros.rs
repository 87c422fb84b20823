/// Declares a [`FlagSet`](crate::FlagSet) as a type with one [`Flag`](crate::Flag) constant per member
///
/// The set is validated during constant evaluation, a member that is not a power of two stops the
/// crate from compiling.
///
/// ```
/// use bit_aware::{flag_set, BitAware};
/// flag_set! {
///     /// File access bits
///     pub struct Permission {
///         READ = 1,
///         WRITE = 2,
///         EXEC = 4,
///     }
/// }
/// assert_eq!(Permission::SET.limit(), 7);
/// assert_eq!(Permission::READ | Permission::EXEC, 5);
/// let names: Vec<_> = Permission::SET.iter().map(|flag| flag.name()).collect();
/// assert_eq!(names, ["READ", "WRITE", "EXEC"]);
/// ```
///
/// A member that is not a power of two fails with `value 3 for 'THREE' is not a power of two`:
///
/// ```compile_fail
/// bit_aware::flag_set! {
///     pub struct Broken {
///         ONE = 1,
///         THREE = 3,
///     }
/// }
/// ```
///
/// ```compile_fail
/// bit_aware::flag_set! {
///     pub struct Zero {
///         NONE = 0,
///     }
/// }
/// ```
///
/// A repeated name is rejected too:
///
/// ```compile_fail
/// bit_aware::flag_set! {
///     pub struct Twice {
///         ONE = 1,
///         ONE = 2,
///     }
/// }
/// ```
#[macro_export]
macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$flag_meta:meta])* $flag:ident = $value:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $name {
            $(
                $(#[$flag_meta])*
                pub const $flag: $crate::Flag = $crate::Flag::new(stringify!($flag), $value);
            )*

            pub const SET: $crate::FlagSet = {
                const MEMBERS: &[$crate::Flag] = &[$($name::$flag),*];
                match $crate::FlagSet::new(stringify!($name), MEMBERS) {
                    Ok(set) => set,
                    Err($crate::DefinitionError::DuplicateName { .. }) => panic!(concat!(
                        "`",
                        stringify!($name),
                        "` declares the same member name twice"
                    )),
                    Err($crate::DefinitionError::NotPowerOfTwo { .. }) => panic!(concat!(
                        "`",
                        stringify!($name),
                        "` has a member that is not a power of two"
                    )),
                }
            };
        }

        $(
            const _: () = assert!(
                $name::$flag.is_reserved() || $name::$flag.value().is_power_of_two(),
                concat!(
                    "value ",
                    stringify!($value),
                    " for '",
                    stringify!($flag),
                    "' is not a power of two"
                )
            );
        )*

        const _: &$crate::FlagSet = &$name::SET;

        impl $crate::Binding for $name {
            const FLAGS: Option<&'static $crate::FlagSet> = Some(&$name::SET);
        }
    };
}

/// Declares a named [`Binding`](crate::Binding) over a [`flag_set!`] type with labelled special values
///
/// Each label also becomes a `u64` constant of the new type.
///
/// ```
/// use bit_aware::{bit_aware, flag_set, BitAware};
/// flag_set! {
///     pub struct Permission {
///         READ = 1,
///         WRITE = 2,
///         EXEC = 4,
///     }
/// }
/// bit_aware! {
///     pub struct Access: Permission {
///         ALL = 7,
///     }
/// }
/// let access: BitAware<Access> = BitAware::new(Access::ALL).unwrap();
/// assert_eq!(access.to_string(), "ALL [READ, WRITE, EXEC]");
/// assert_eq!(format!("{access:?}"), "Access(Permission.READ | Permission.WRITE | Permission.EXEC)");
/// ```
#[macro_export]
macro_rules! bit_aware {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $flags:ty {
            $($(#[$prop_meta:meta])* $prop:ident = $value:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $name {
            $(
                $(#[$prop_meta])*
                pub const $prop: u64 = $value;
            )*
        }

        impl $crate::Binding for $name {
            const NAME: &'static str = stringify!($name);
            const FLAGS: Option<&'static $crate::FlagSet> = <$flags as $crate::Binding>::FLAGS;
            const PROPERTIES: &'static [(u64, &'static str)] = &[$(($name::$prop, stringify!($prop))),*];
        }
    };
}
