/// Builds an [`Args`](crate::Args) map from `name => value` pairs.
///
/// ```
/// let args = searchmap_core::args! {
///     "title" => "hello",
///     "tags" => ["news"],
/// };
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    (
        $( $name:expr => $value:expr ),+ $(,)?
    ) => {{
        let mut args = $crate::Args::new();
        $( args.insert($name, $value); )+
        args
    }};
}
