use thiserror_no_std::Error;

/// The error returned when a bulk construction can not start.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq, Hash)]
pub enum ConstructError {
    /// Elements were to be copied from a source without any elements.
    #[error("cannot construct {n} elements by copying from an empty source")]
    EmptySource {
        /// The number of elements requested.
        n: usize,
    },
}
