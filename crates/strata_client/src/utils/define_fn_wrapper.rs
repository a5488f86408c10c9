// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Generates a cloneable, thread-safe wrapper around a user callback.
///
/// The wrapper stores the callback as an `Arc<dyn Fn..>` so that layers can hand the same
/// callback to every middleware instance they build.
///
/// ```rust,ignore
/// define_fn_wrapper!(OnRetry<Out>(Fn(&Out, OnRetryArgs)));
/// ```
///
/// generates `OnRetry<Out>` with `new(f)`, `call(..)`, `Clone` and a `Debug` that prints the
/// type name only.
macro_rules! define_fn_wrapper {
    ($name:ident<$($generics:ident),*>(Fn($($param_name:ident: $param_ty:ty),*) -> $return_ty:ty)) => {
        pub(crate) struct $name<$($generics),*>(std::sync::Arc<dyn Fn($($param_ty),*) -> $return_ty + Send + Sync>);

        impl<$($generics),*> $name<$($generics),*> {
            pub(crate) fn new<F>(callback: F) -> Self
            where
                F: Fn($($param_ty),*) -> $return_ty + Send + Sync + 'static,
            {
                Self(std::sync::Arc::new(callback))
            }

            pub(crate) fn call(&self, $($param_name: $param_ty),*) -> $return_ty {
                (self.0)($($param_name),*)
            }
        }

        impl<$($generics),*> Clone for $name<$($generics),*> {
            fn clone(&self) -> Self {
                Self(std::sync::Arc::clone(&self.0))
            }
        }

        impl<$($generics),*> std::fmt::Debug for $name<$($generics),*> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish()
            }
        }
    };

    ($name:ident<$($generics:ident),*>(Fn($param1:ty, $param2:ty))) => {
        $crate::utils::define_fn_wrapper!($name<$($generics),*>(Fn(arg1: $param1, arg2: $param2) -> ()));
    };

    ($name:ident<$($generics:ident),*>(Fn($param1:ty))) => {
        $crate::utils::define_fn_wrapper!($name<$($generics),*>(Fn(arg1: $param1) -> ()));
    };

    ($name:ident(Fn($param1:ty))) => {
        $crate::utils::define_fn_wrapper!($name<>(Fn(arg1: $param1) -> ()));
    };
}

pub(crate) use define_fn_wrapper;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::fmt::Debug;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    define_fn_wrapper!(Probe<In>(Fn(&In)));
    define_fn_wrapper!(Pair<In, Out>(Fn(&In, Out)));
    define_fn_wrapper!(Plain(Fn(&str)));

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(Probe<String>: Send, Sync, Debug, Clone);
        static_assertions::assert_impl_all!(Pair<String, u32>: Send, Sync, Debug, Clone);
        static_assertions::assert_impl_all!(Plain: Send, Sync, Debug, Clone);
    }

    #[test]
    fn clones_share_callback() {
        static CALLS: AtomicU32 = AtomicU32::new(0);
        let probe = Probe::new(|_: &String| {
            CALLS.fetch_add(1, Ordering::Relaxed);
        });

        probe.call(&String::new());
        probe.clone().call(&String::new());

        assert_eq!(CALLS.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn call_forwards_all_arguments() {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&seen);
        let pair = Pair::new(move |input: &String, out: u32| sink.lock().unwrap().push(format!("{input}:{out}")));

        pair.call(&"a".to_string(), 1);

        assert_eq!(*seen.lock().unwrap(), vec!["a:1".to_string()]);
    }

    #[test]
    fn debug_prints_name_only() {
        let probe = Probe::new(|_: &u8| {});

        assert_eq!(format!("{probe:?}"), "Probe");
    }
}
