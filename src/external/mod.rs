//! Provides abstractions over the programs and files the utility works with

pub mod brightness;
pub mod command;
pub mod dependency_provider;
pub mod kernel_module;
pub mod notification;
pub mod state;
