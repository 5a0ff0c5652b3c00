//! Ownership and refresh of the active score policy.

mod handle;
mod http;
mod refresher;
mod source;

pub use handle::{ActivePolicy, PolicyHandle};
pub use http::HttpPolicySource;
pub use refresher::{PolicyRefresher, RefreshOutcome};
pub use source::{FilePolicySource, PolicySource, PolicySourceError, StaticPolicySource};
