/// Logs a trace message, but only when the `regmin_debug-trace` feature is
/// enabled. Otherwise the arguments are type checked and then compiled away.
#[cfg(feature = "regmin_debug-trace")]
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        $crate::log::trace!($($arg)*)
    };
}

/// Logs a trace message, but only when the `regmin_debug-trace` feature is
/// enabled. Otherwise the arguments are type checked and then compiled away.
#[cfg(not(feature = "regmin_debug-trace"))]
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if false {
            $crate::log::trace!($($arg)*)
        }
    };
}
