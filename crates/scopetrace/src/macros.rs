//! Profiling macros.

/// Fully-qualified path of the enclosing function, as `&'static str`.
///
/// # Examples
///
/// ```
/// fn build_page() -> &'static str {
///     scopetrace::function_name!()
/// }
///
/// assert!(build_page().ends_with("build_page"));
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// Time the rest of the enclosing scope.
///
/// When the `profiling` feature is disabled, this macro expands to nothing.
///
/// # Examples
///
/// ```ignore
/// use scopetrace::{profile_scope, Instrumentor};
///
/// fn build_page(instrumentor: &Instrumentor) {
///     profile_scope!(instrumentor, "build page");
///     // ... page build code
/// } // timing recorded here
/// ```
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_scope {
    ($instrumentor:expr, $label:expr) => {
        let _profile_guard = $crate::ScopedTimer::start(&$instrumentor, $label);
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_scope {
    ($instrumentor:expr, $label:expr) => {};
}

/// Time the rest of the enclosing function, labeled with its path.
///
/// When the `profiling` feature is disabled, this macro expands to nothing.
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_function {
    ($instrumentor:expr) => {
        $crate::profile_scope!($instrumentor, $crate::function_name!());
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_function {
    ($instrumentor:expr) => {};
}

#[cfg(test)]
mod tests {
    #[test]
    fn function_name_names_the_function() {
        let name = crate::function_name!();
        assert!(name.ends_with("tests::function_name_names_the_function"), "{name}");
    }

    #[cfg(feature = "profiling")]
    #[test]
    fn macros_record_scopes() {
        use crate::test_support::read_events;
        use crate::Instrumentor;

        fn function1(instrumentor: &Instrumentor) {
            profile_function!(instrumentor);
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macros.json");
        let instrumentor = Instrumentor::new();
        instrumentor.begin_session_at("Profile", &path).unwrap();
        {
            profile_scope!(instrumentor, "outer");
            function1(&instrumentor);
        }
        instrumentor.end_session().unwrap();

        let events = read_events(&path);
        assert_eq!(events.len(), 2);
        assert!(events[0]["name"].as_str().unwrap().ends_with("function1"));
        assert_eq!(events[1]["name"], "outer");
    }
}
