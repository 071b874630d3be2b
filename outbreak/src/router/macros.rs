/// Generate a router async method that walks capable connectors in priority order
/// and calls a single-provider method on the first one that succeeds.
///
/// The optional `pre` statements run before routing; use them to validate and
/// rebind the arguments so bad input fails without touching any connector.
macro_rules! outbreak_router_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $( $arg_ident:ident : $arg_ty:ty ),* ) -> $ret:ty,
        accessor: $accessor:ident,
        capability: $capability:expr,
        $( pre: { $( $pre:tt )* }, )?
        call: $call_name:ident( $( $call_arg:ident ),* )
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(target = "outbreak::router", skip(self))
        )]
        ///
        /// # Errors
        /// Returns an error if the arguments are invalid, no capable connector
        /// succeeds, or none supports the capability.
        pub async fn $name(
            &self,
            $( $arg_ident: $arg_ty ),*
        ) -> Result<$ret, outbreak_core::OutbreakError> {
            $( $( $pre )* )?
            self.fetch_single($capability, move |c| {
                c.$accessor()?;
                Some(async move {
                    match c.$accessor() {
                        Some(p) => p.$call_name($( $call_arg ),*).await,
                        None => Err(outbreak_core::OutbreakError::unsupported(
                            $capability.as_str(),
                        )),
                    }
                })
            })
            .await
        }
    };
}

pub(crate) use outbreak_router_method;
