mod config;
mod emblem;
mod hash;
mod registry;
