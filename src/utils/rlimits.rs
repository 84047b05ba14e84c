/// Resource limit raising for validator processes
///
/// Validators inherit the checker's limits. Deeply recursive validators need
/// a large stack, so the soft stack and address-space limits are lifted to
/// their hard ceilings once at startup.
use crate::config::types::Result;
use nix::sys::resource::{getrlimit, setrlimit, Resource};

/// Resources lifted to their hard limit
pub const RAISED_RESOURCES: [Resource; 2] = [Resource::RLIMIT_STACK, Resource::RLIMIT_AS];

/// Raise one soft limit to its hard limit, returning the new soft value
pub fn raise_to_hard_limit(resource: Resource) -> Result<u64> {
    let (soft, hard) = getrlimit(resource)?;
    if soft != hard {
        setrlimit(resource, hard, hard)?;
        log::debug!("Raised {:?} soft limit from {} to {}", resource, soft, hard);
    }
    Ok(hard as u64)
}

/// Best-effort raise of every resource in [`RAISED_RESOURCES`]
pub fn raise_validator_limits() {
    for resource in RAISED_RESOURCES {
        if let Err(e) = raise_to_hard_limit(resource) {
            log::warn!("Could not raise {:?}: {}", resource, e);
        }
    }
}
