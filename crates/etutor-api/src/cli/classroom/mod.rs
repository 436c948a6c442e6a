//! Interactive classroom for the terminal.
//!
//! One loop reads learner input and command results and feeds both through
//! `Classroom::dispatch`: lesson text, summaries, the quiz overlay, and a
//! live-streamed tutor chat. Entry point: `loop_runner::run_classroom`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
