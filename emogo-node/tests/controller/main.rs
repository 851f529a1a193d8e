mod common;

mod pass;
mod placement;
mod tap;
