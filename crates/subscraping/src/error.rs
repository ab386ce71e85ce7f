use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    // -- CLI
    CliUsage(String),
    InvalidDomain(String),

    // -- Source protocol
    #[from]
    Reqwest(reqwest::Error),
    UnexpectedStatus {
        url: String,
        status: u16,
    },
    Serialization(serde_json::Error),
    Decode(serde_json::Error),

    // -- Config
    #[from]
    Io(std::io::Error),
    #[from]
    Yaml(serde_yaml::Error),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
