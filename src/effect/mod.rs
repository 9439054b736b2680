pub(crate) mod mount;
pub(crate) mod presets;
pub(crate) mod spec;
