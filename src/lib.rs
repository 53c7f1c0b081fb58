//! Certctl library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod dispatch;
pub mod surface;

#[cfg(test)]
pub mod test_support;

/// How an action name is shaped into a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One shared endpoint; the action rides in a JSON body field.
    #[default]
    Body,
    /// One endpoint per action, looked up in a static table; empty body.
    Table,
}
