//! Re-analysis domain - status lifecycle of a server-side re-analysis request.
//!
//! ```text
//! Idle --trigger--> InProgress --success--> Success --(refresh)--> Idle
//!                   InProgress --failure--> Error   --(reset)----> Idle
//! Error --retry--> InProgress
//! ```

mod errors;
mod status;

pub use errors::ReanalysisError;
pub use status::ReanalysisStatus;
