/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Client declaration model produced by the extractor and consumed by generators.
 */

use serde::Serialize;

/// Everything declared in one declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Go package name taken from the package clause.
    pub name: String,
    /// Import path of the dispatch package, when the declaration file imports it.
    pub dispatch_import: Option<String>,
    /// Clients in declaration order.
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    /// Service name as declared, without quotes or casing applied.
    pub name: String,
    pub funcs: Vec<Func>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Func {
    /// Method name as declared, without quotes or casing applied.
    pub name: String,
    /// At most one entry: a declaration names a single parameter type.
    pub params: Vec<Param>,
    pub response_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub type_name: String,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dispatch_import: None,
            clients: Vec::new(),
        }
    }

    /// Total number of API functions across all clients.
    pub fn func_count(&self) -> usize {
        self.clients.iter().map(|client| client.funcs.len()).sum()
    }
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            funcs: Vec::new(),
        }
    }
}

impl Func {
    pub fn new(name: impl Into<String>, response_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            response_type: response_type.into(),
        }
    }

    pub fn with_param(mut self, type_name: impl Into<String>) -> Self {
        self.params.push(Param {
            type_name: type_name.into(),
        });
        self
    }
}
