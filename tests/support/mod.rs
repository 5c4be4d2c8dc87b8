#![allow(dead_code)]

pub mod dockshift_env;
