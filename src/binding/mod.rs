pub(crate) mod bound;
pub(crate) mod node;
pub(crate) mod property;
