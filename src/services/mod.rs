// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - platform clients and aggregation.

pub mod aggregator;
pub mod gfg;
pub mod github;
mod graphql;
pub mod leetcode;

pub use aggregator::StatsService;
pub use gfg::{GfgClient, GfgProfile};
pub use github::{GithubActivity, GithubClient};
pub use leetcode::{LeetCodeActivity, LeetCodeClient, LeetCodeProfile};
