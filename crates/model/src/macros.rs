/// Implements [`Record`](crate::records::record::Record) for a plain struct by
/// listing its logical field names next to the Rust fields that back them.
///
/// ```
/// use model::record;
///
/// struct Customer {
///     customer_id: i64,
///     name: String,
///     address: Option<String>,
/// }
///
/// record!(Customer {
///     "customerID" => customer_id,
///     "name" => name,
///     "address" => address,
/// });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::records::record::Record for $ty {
            fn get(&self, field: &str) -> Option<$crate::core::value::Value> {
                match field {
                    $($name => Some($crate::core::value::Value::from(self.$field.clone())),)*
                    _ => None,
                }
            }
        }
    };
}
