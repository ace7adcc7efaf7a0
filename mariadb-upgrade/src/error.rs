/// Error type for the mariadb-upgrade crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A session to the server could not be opened.
    #[error("Could not connect to MariaDB server: {0}")]
    Connection(String),
    #[error("{0}")]
    Mysql(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl From<mysql::Error> for Error {
    fn from(value: mysql::Error) -> Self {
        Self::Mysql(value.to_string())
    }
}

// Manual PartialEq implementation because std::io::Error doesn't implement PartialEq
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Connection(a), Self::Connection(b)) => a == b,
            (Self::Mysql(a), Self::Mysql(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind() && a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
