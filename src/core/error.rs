//! Error types for the currency converter client

use reqwest::StatusCode;
use thiserror::Error;

/// Failures a single converter operation can produce.
///
/// None of these end an interactive session; the command loop reports them
/// and prompts again.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// The API answered with anything other than `200 OK`.
    #[error("Failed to fetch data from API. Status code: {status}")]
    Remote { status: StatusCode },

    /// The body was not JSON or did not have the expected shape.
    #[error("Unexpected response from API: {0}")]
    Decode(String),

    /// The user-supplied amount is not a number.
    #[error("Invalid amount.")]
    InvalidInput { input: String },

    /// The request never completed (connection refused, timeout, ...).
    /// Built through [`ConverterError::transport`] so the request URL, which
    /// carries the API key, is never part of the message.
    #[error("Request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ConverterError {
    pub fn transport(err: reqwest::Error) -> Self {
        ConverterError::Transport(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;
