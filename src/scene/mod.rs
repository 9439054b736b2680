pub(crate) mod host;
pub(crate) mod model;
pub(crate) mod simulate;
