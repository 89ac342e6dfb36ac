//! Showcase crate for the Marquee movie tool.
//!
//! This crate contains the orchestrator that turns a selected title into a
//! `MoviePage`: movie details, audience sentiment, and similar titles.

pub mod orchestrator;

pub use orchestrator::{MoviePage, MovieShowcase, SentimentSection};
