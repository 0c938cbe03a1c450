#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Invalid filter '{0}': expected NAME=VALUE")]
    InvalidAssignment(String),

    #[error("Unknown criterion '{name}'. Valid criteria: {valid}")]
    UnknownCriterion { name: String, valid: String },
}
