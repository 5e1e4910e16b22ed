// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use thiserror::Error;

/// Spot price API error types
#[derive(Error, Debug)]
pub enum ElprisError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Price API returned error status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type ElprisResult<T> = Result<T, ElprisError>;
