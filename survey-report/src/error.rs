use thiserror::Error;

#[derive(Debug, Error)]
pub enum Status {
    #[error("Can not read fixes from {path}")]
    BadFixes {
        path: String,
        #[source]
        source: csv::Error,
    },
}
