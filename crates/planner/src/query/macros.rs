/// Combines any number of fragments, in argument order.
///
/// `combine!(a, b, c)` is `Fragment::combine_all([a, b, c])`.
#[macro_export]
macro_rules! combine {
    ($($fragment:expr),* $(,)?) => {
        $crate::query::fragment::Fragment::combine_all([$($fragment),*])
    };
}

/// A literal text fragment, with `format!` syntax.
#[macro_export]
macro_rules! sql_text {
    ($($arg:tt)*) => {
        $crate::query::fragment::Fragment::text(format!($($arg)*))
    };
}
