use thiserror::Error;

use crate::client::ClientError;
use crate::timeline::MalformedTimestamp;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("invalid created time of issue {key}")]
    MalformedTimestamp {
        key: String,
        #[source]
        source: MalformedTimestamp,
    },
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to write timeline")]
    Io(#[from] std::io::Error),
}

pub type TimelineResult<T> = Result<T, TimelineError>;
