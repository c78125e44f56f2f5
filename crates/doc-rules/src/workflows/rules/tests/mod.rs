mod common;
mod screens;
