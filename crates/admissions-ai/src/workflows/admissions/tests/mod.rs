pub(crate) mod common;

mod evaluation;
mod import;
