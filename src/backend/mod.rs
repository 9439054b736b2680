pub(crate) mod count;
pub(crate) mod text;
