pub(crate) mod host;
pub(crate) mod registry;
pub(crate) mod source;
