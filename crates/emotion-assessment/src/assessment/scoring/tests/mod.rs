mod common;
mod composites;
