//! # taskform-task
//!
//! Source schema for the translator: task definition records as the
//! orchestration API returns them, plus JSON loading.
//!
//! Records are plain data. Everything the API may omit is an explicit
//! `Option`, so downstream translation can tell "unset" from "empty".

pub mod definition;
