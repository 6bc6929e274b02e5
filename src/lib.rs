#![allow(dead_code)]

pub mod analysis;
pub mod cli;
pub mod game;
pub mod search;
pub mod strategy;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::collections::{HashMap, HashSet};
    }
}

pub mod prelude {
    pub use super::analysis::*;
    pub use super::cli::*;
    pub use super::game::prelude::*;
    pub use super::search::prelude::*;
    pub use super::strategy::*;
    pub use super::utils::prelude::*;
}
