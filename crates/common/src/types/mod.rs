use serde::Serialize;

/// Body returned by the liveness probe.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
