use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Error envelope returned by every failing endpoint.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub message: String,
}
