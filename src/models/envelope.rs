// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response envelope shared by every backend endpoint.

use serde::{Deserialize, Serialize};

/// `{ success, message, data }` wrapper around every response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Envelope for a 2xx response that carried no body.
    pub fn empty() -> Self {
        Self {
            success: true,
            message: String::new(),
            data: None,
        }
    }
}
