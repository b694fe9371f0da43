//! Items used by the expansion of exported macros. Not public API.

// -----------------------------------------------------------------------------
// auto_register

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::info::ClassInfo;
    use crate::registry::ClassRegistry;
    use crate::{ClassInfoCell, Typed};

    pub use inventory;

    /// A class submitted with `register_class!`.
    pub struct ClassRegistration(pub fn() -> &'static ClassInfo);

    inventory::collect!(ClassRegistration);

    /// Submitted by this crate itself; seeing it proves collection works
    /// on the current platform.
    pub struct __AvailFlag;

    impl Typed for __AvailFlag {
        fn class_info() -> &'static ClassInfo {
            static CELL: ClassInfoCell = ClassInfoCell::new();
            CELL.get_or_init(|| ClassInfo::new::<Self>("__AvailFlag"))
        }
    }

    inventory::submit!(ClassRegistration(<__AvailFlag as Typed>::class_info));

    /// Registers every submitted class, returning whether the flag was seen.
    pub fn register_classes(registry: &mut ClassRegistry) -> bool {
        let flag = __AvailFlag::class_info();
        let mut available = false;
        for registration in inventory::iter::<ClassRegistration> {
            let info = (registration.0)();
            if core::ptr::eq(info, flag) {
                available = true;
            } else {
                registry.register_info(info);
            }
        }
        available
    }
}

// -----------------------------------------------------------------------------
// register_class

/// Submits a [`Typed`](crate::Typed) class for
/// [`ClassRegistry::auto_register`](crate::registry::ClassRegistry::auto_register).
///
/// Expands to nothing without the `auto_register` feature.
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_class {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::ClassRegistration(
                    <$ty as $crate::Typed>::class_info
                )
            }
        )+
    };
}

/// Submits a [`Typed`](crate::Typed) class for
/// [`ClassRegistry::auto_register`](crate::registry::ClassRegistry::auto_register).
///
/// Expands to nothing without the `auto_register` feature.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! register_class {
    ($($ty:ty),+ $(,)?) => {};
}
