//! CLI command implementations.
//!
//! | Module      | Commands handled |
//! |-------------|------------------|
//! | `review`    | `Review`         |
//! | `languages` | `Languages`      |
//! | `config`    | `Config`         |

pub mod config;
pub mod languages;
pub mod review;

pub use config::cmd_config;
pub use languages::cmd_languages;
pub use review::{ReviewArgs, cmd_review};
