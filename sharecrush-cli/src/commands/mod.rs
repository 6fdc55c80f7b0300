// sharecrush-cli/src/commands/mod.rs

pub mod apply;
pub mod build;
