/// Guarantees that no more execution happens after it is dropped.
///
/// Arm it around code that must not unwind and `mem::forget` it once that code has returned.
pub(crate) struct AbortOnDrop;

impl Drop for AbortOnDrop {
    #[cfg(feature = "std")]
    fn drop(&mut self) {
        std::process::abort()
    }

    #[cfg(not(feature = "std"))]
    fn drop(&mut self) {
        struct CauseDoublePanic;
        impl Drop for CauseDoublePanic {
            fn drop(&mut self) { panic!() }
        }
        struct FallbackInCaseThisDidntAbort;
        impl Drop for FallbackInCaseThisDidntAbort {
            fn drop(&mut self) { loop {} }
        }
        // A panic while already unwinding from one is an abort.
        let _v = FallbackInCaseThisDidntAbort;
        let _v = CauseDoublePanic;
        panic!();
    }
}
