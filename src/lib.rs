//! AI Intake - Conversational intake service for AI project proposals
//!
//! Collects free-form answers to a fixed set of interview questions
//! through a language-model oracle that extracts structured,
//! quality-scored answers from conversation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
