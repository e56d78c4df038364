//! Chapter page core for the QuranKu reader: data sources, verse mapping,
//! shared player state and the chapter page controller.

#![no_std]

extern crate alloc;

pub mod app;
pub mod chapter;
pub mod config;
pub mod content;
pub mod input;
pub mod mapper;
pub mod render;
pub mod store;
mod text_utils;
