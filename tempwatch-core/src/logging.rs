//! Logging macros
//!
//! Forwards to `log` or `defmt` depending on the enabled feature. With
//! neither enabled the macros type-check their arguments and emit nothing.
//! Messages only use `{}` and `{:?}` so they format under both backends.
//!
//! The macros are textually scoped: `lib.rs` declares this module first
//! with `#[macro_use]`, and every later module calls them without imports.

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        macro_rules! trace {
            ($($arg:tt)*) => { ::log::trace!($($arg)*) };
        }
        macro_rules! debug {
            ($($arg:tt)*) => { ::log::debug!($($arg)*) };
        }
        macro_rules! info {
            ($($arg:tt)*) => { ::log::info!($($arg)*) };
        }
        macro_rules! warn {
            ($($arg:tt)*) => { ::log::warn!($($arg)*) };
        }
        #[allow(unused_macros)]
        macro_rules! error {
            ($($arg:tt)*) => { ::log::error!($($arg)*) };
        }
    }
    else if #[cfg(feature = "defmt")] {
        macro_rules! trace {
            ($($arg:tt)*) => { ::defmt::trace!($($arg)*) };
        }
        macro_rules! debug {
            ($($arg:tt)*) => { ::defmt::debug!($($arg)*) };
        }
        macro_rules! info {
            ($($arg:tt)*) => { ::defmt::info!($($arg)*) };
        }
        macro_rules! warn {
            ($($arg:tt)*) => { ::defmt::warn!($($arg)*) };
        }
        #[allow(unused_macros)]
        macro_rules! error {
            ($($arg:tt)*) => { ::defmt::error!($($arg)*) };
        }
    }
    else {
        #[macro_export]
        macro_rules! trace {
            ($($arg:tt)*) => {{ if false { let _ = ::core::format_args!($($arg)*); } }};
        }
        #[macro_export]
        macro_rules! debug {
            ($($arg:tt)*) => {{ if false { let _ = ::core::format_args!($($arg)*); } }};
        }
        #[macro_export]
        macro_rules! info {
            ($($arg:tt)*) => {{ if false { let _ = ::core::format_args!($($arg)*); } }};
        }
        #[macro_export]
        macro_rules! warn {
            ($($arg:tt)*) => {{ if false { let _ = ::core::format_args!($($arg)*); } }};
        }
        #[macro_export]
        macro_rules! error {
            ($($arg:tt)*) => {{ if false { let _ = ::core::format_args!($($arg)*); } }};
        }
    }
}
