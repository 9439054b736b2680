pub(crate) mod spring;
