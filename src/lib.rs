// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budget;
pub mod categories;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod filters;
pub mod models;
pub mod repo;
pub mod report;
pub mod settings;
pub mod store;
pub mod streak;
pub mod summary;
pub mod utils;
pub mod wallet;
