//!
//! [`Result`] type alias bound to the list engine [`Error`](crate::error::Error) enum.
//!

pub type Result<T, E = super::error::Error> = std::result::Result<T, E>;
