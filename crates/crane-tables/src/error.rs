use thiserror::Error;

#[derive(Error, Debug)]
pub enum TablesError {
    #[error("TABLES/PARSE: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("TABLES/IO: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TABLES/INCONSISTENT: {0}")]
    Inconsistent(String),
}
