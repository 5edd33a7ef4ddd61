// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod models;
pub mod reconcile;
pub mod sanitize;
pub mod store;
pub mod utils;
