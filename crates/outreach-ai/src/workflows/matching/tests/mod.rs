mod cache;
mod common;
mod contract;
