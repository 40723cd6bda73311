//! Logging shims.
//!
//! Forward to `defmt` when the `defmt` feature is enabled and compile to nothing
//! otherwise. Arguments are still borrowed in the disabled case so call sites do
//! not trigger unused-variable warnings.

#![allow(unused_macros)]

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::defmt::trace!($s $(, $x)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($( & $x ),*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::defmt::debug!($s $(, $x)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($( & $x ),*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::defmt::info!($s $(, $x)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($( & $x ),*);
    }};
}
