use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine has no parameter section '{section}'")]
    MissingForce { section: String },

    #[error("No parameters for key '{key}' in section '{section}'")]
    MissingParameters { section: String, key: String },

    #[error("Atom {index} ('{name}') could not be assigned a force-field type")]
    UntypedAtom { index: usize, name: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}
