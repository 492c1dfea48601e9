//! Behavioural tests for the addons against fake host collaborators.

pub mod support;

mod mo;
mod msgmerge;
